//! Portfolio content provider.
//!
//! The terminal never hard-codes biography text: every command builder reads
//! from a [`Profile`]. A profile ships embedded in the binary and can be
//! replaced wholesale by pointing `content.profile_path` at another TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ContentError, Result};

const BUILTIN_PROFILE: &str = include_str!("../assets/profile.toml");

/// Hyperlink rendered with a visible label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkRef {
    pub label: String,
    pub href: String,
}

/// Picture shown as a placeholder in the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageRef {
    pub alt: String,
    pub source: String,
}

/// One bullet of the about page
///
/// When `action_label` occurs in `text`, that phrase becomes an embedded
/// command trigger running `action_command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highlight {
    pub text: String,
    #[serde(default)]
    pub action_label: Option<String>,
    #[serde(default)]
    pub action_command: Option<String>,
}

impl Highlight {
    /// Split `text` around the action label: `(before, label, command, after)`
    pub fn split_action(&self) -> Option<(&str, &str, &str, &str)> {
        let label = self.action_label.as_deref()?;
        let command = self.action_command.as_deref()?;
        let start = self.text.find(label)?;
        let end = start + label.len();
        Some((&self.text[..start], label, command, &self.text[end..]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub intro: String,
    #[serde(default)]
    pub intro_link: Option<LinkRef>,
    pub prelude: String,
    pub portrait: ImageRef,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// A position (job, internship, leadership role)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub title: String,
    pub organization: String,
    pub location: String,
    pub dates: String,
    #[serde(default)]
    pub logo: Option<ImageRef>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl Role {
    pub fn heading(&self) -> String {
        format!("{}, {}", self.title, self.organization)
    }

    pub fn subtitle(&self) -> String {
        format!("{} · {}", self.location, self.dates)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct School {
    pub institution: String,
    pub location: String,
    pub details: String,
    #[serde(default)]
    pub logo: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectsBlurb {
    pub paragraphs: Vec<String>,
    pub teaser: String,
    #[serde(default)]
    pub teaser_link: Option<LinkRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Social {
    pub label: String,
    pub value: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pet {
    pub name: String,
    pub image: ImageRef,
    pub story: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pets {
    pub together: ImageRef,
    pub caption: String,
    #[serde(default)]
    pub members: Vec<Pet>,
}

/// Node of the fake directory tree printed by `pwd`; names ending in `/` are directories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// The file fetched by the simulated `wget resume`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResumeSpec {
    pub url: String,
    pub host: String,
    pub addresses: Vec<String>,
    pub file_name: String,
    pub size_label: String,
}

impl ResumeSpec {
    /// First resolved address (the one the transcript "connects" to)
    pub fn primary_address(&self) -> &str {
        self.addresses.first().map(String::as_str).unwrap_or("0.0.0.0")
    }
}

/// Everything the canned commands know about the portfolio owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Breadcrumb printed above the `pwd` tree
    pub home: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub about: About,
    #[serde(default)]
    pub experience: Vec<Role>,
    #[serde(default)]
    pub archived_experience: Vec<Role>,
    #[serde(default)]
    pub activities: Vec<Role>,
    #[serde(default)]
    pub education: Vec<School>,
    pub projects: ProjectsBlurb,
    #[serde(default)]
    pub archived_projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub socials: Vec<Social>,
    pub pets: Pets,
    #[serde(default)]
    pub tree: Vec<TreeNode>,
    pub resume: ResumeSpec,
}

impl Profile {
    /// Parse a profile from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(s).map_err(ContentError::from)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ContentError::NotFound(path.to_path_buf()).into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The profile compiled into the binary
    pub fn load_builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_PROFILE)
    }

    /// Custom profile when a path is configured, built-in otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading custom profile");
                Self::from_file(path)
            }
            None => Self::load_builtin(),
        }
    }

    fn validate(&self) -> std::result::Result<(), ContentError> {
        if self.name.trim().is_empty() {
            return Err(ContentError::InvalidProfile("name must not be empty".to_string()));
        }
        if self.resume.file_name.trim().is_empty() {
            return Err(ContentError::InvalidProfile("resume.file_name must not be empty".to_string()));
        }
        for highlight in &self.about.highlights {
            if highlight.action_command.is_some() != highlight.action_label.is_some() {
                return Err(ContentError::InvalidProfile(format!(
                    "highlight '{}' needs both action_label and action_command",
                    highlight.text
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn test_builtin_profile_loads() {
        let profile = Profile::load_builtin().unwrap();
        assert_eq!(profile.name, "Sohail (Neel) Sarkar");
        assert_eq!(profile.achievements.len(), 3);
        assert_eq!(profile.skills.len(), 6);
        assert_eq!(profile.socials.len(), 4);
        assert_eq!(profile.pets.members.len(), 2);
        assert_eq!(profile.resume.file_name, "sohail_sarkar_resume.pdf");
        assert_eq!(profile.resume.primary_address(), "185.199.108.153");
    }

    #[test]
    fn test_highlight_split_action() {
        let profile = Profile::load_builtin().unwrap();
        let pets = profile.about.highlights.iter().find(|h| h.action_label.is_some()).unwrap();
        let (before, label, command, after) = pets.split_action().unwrap();
        assert_eq!(before, "▸ Proud dog brother to ");
        assert_eq!(label, "Snowy and Pluto");
        assert_eq!(command, "ls ./snowyandpluto/");
        assert_eq!(after, ", who debug my life better than I do");
    }

    #[test]
    fn test_highlight_without_action() {
        let h = Highlight { text: "plain".to_string(), action_label: None, action_command: None };
        assert!(h.split_action().is_none());

        let h = Highlight {
            text: "label missing".to_string(),
            action_label: Some("nope".to_string()),
            action_command: Some("help".to_string()),
        };
        assert!(h.split_action().is_none());
    }

    #[test]
    fn test_tree_dirs() {
        let profile = Profile::load_builtin().unwrap();
        let archives = profile.tree.iter().find(|n| n.name == "archives/").unwrap();
        assert!(archives.is_dir());
        assert_eq!(archives.children.len(), 2);
        assert!(!profile.tree.iter().find(|n| n.name == "about.txt").unwrap().is_dir());
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let result = Profile::from_toml_str("name = \"x\"");
        assert!(matches!(result, Err(Error::Content(ContentError::InvalidProfile(_)))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = Profile::from_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(Error::Content(ContentError::NotFound(_)))));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUILTIN_PROFILE.replace("Sohail (Neel) Sarkar\"", "Someone Else\"").as_bytes()).unwrap();

        let profile = Profile::load(Some(file.path())).unwrap();
        assert_eq!(profile.name, "Someone Else");
    }
}
