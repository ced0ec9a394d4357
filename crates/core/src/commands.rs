//! The fixed command table and the response builders behind it.
//!
//! Matching is exact: the trimmed input is lower-cased and compared against
//! a handful of special forms before the static table is consulted.

use crate::config::TerminalConfig;
use crate::content::{Profile, Role, TreeNode};
use crate::response::{Block, Inline, ResponseDescriptor, RevealStep, StagedReveal, Tone, TransferKind};

/// Greeting words that redirect to the chat companion
pub const GREETINGS: &[&str] = &["hi", "hello", "hey", "hiya", "howdy", "greetings"];

/// Accepted spellings of the chat-open command (compared lower-cased)
pub const OPEN_CHAT: &[&str] = &["open -a \"chai chat\"", "open -a chai chat"];

/// Prefix of the free-text chat echo
pub const CHAT_PREFIX: &str = "chat ";

pub const CLEAR: &str = "clear";

pub const REDIRECT_MESSAGE: &str =
    "hmm, that's not really a command, please see help, but I am redirecting you to chai just in case";

/// Canned reply of the offline chat echo
pub const CHAT_REPLY: &str = "hi";

/// Commands listed by `help`, in display order
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("pwd", "View directory structure"),
    ("cat about.txt", "About me"),
    ("cd projects", "View projects"),
    ("cat experience.txt", "Work experience"),
    ("cat activities.txt", "Activities & leadership"),
    ("cat education.txt", "Education"),
    ("cat achievements.txt", "Awards & achievements"),
    ("ls ./skills/", "Technical skills"),
    ("whereis socials", "View social links"),
    ("wget resume", "Download resume"),
    ("open -a \"chai chat\"", "Open chat application"),
    ("clear", "Clear terminal"),
];

/// Commands offered by the side menu
pub const MENU_COMMANDS: &[(&str, &str)] = &[
    ("cat about.txt", "About me"),
    ("cat experience.txt", "Work experience"),
    ("cat education.txt", "Education"),
    ("cat achievements.txt", "Awards & achievements"),
    ("ls ./skills/", "Technical skills"),
    ("cd projects", "View projects"),
    ("open -a \"chai chat\"", "Open chai chat"),
    ("wget resume", "Download resume"),
    ("whereis socials", "View social links"),
    ("pwd", "View directory structure"),
];

pub const MENU_TIP: &str = "Click any command to run it in the terminal! You can also type commands directly. \
                            Use arrow keys ↑↓ to navigate command history.";

const ARCHIVED_PROJECTS: &str = "cat archives/old_projects.txt";
const ARCHIVED_EXPERIENCE: &str = "cat archives/old_experience.txt";

/// One row of the static command table
#[derive(Debug)]
pub struct CommandSpec {
    /// Normalized (lower-case) match key
    pub key: &'static str,
    pub summary: &'static str,
    pub build: fn(&Profile) -> ResponseDescriptor,
}

static TABLE: &[CommandSpec] = &[
    CommandSpec { key: "help", summary: "List available commands", build: help },
    CommandSpec { key: "pwd", summary: "View directory structure", build: pwd },
    CommandSpec { key: "cat about.txt", summary: "About me", build: about },
    CommandSpec { key: "cd projects", summary: "View projects", build: projects },
    CommandSpec { key: "cat experience.txt", summary: "Work experience", build: experience },
    CommandSpec { key: "cat activities.txt", summary: "Activities & leadership", build: activities },
    CommandSpec { key: "cat education.txt", summary: "Education", build: education },
    CommandSpec { key: "cat achievements.txt", summary: "Awards & achievements", build: achievements },
    CommandSpec { key: "ls ./skills/", summary: "Technical skills", build: skills },
    CommandSpec { key: "whereis socials", summary: "View social links", build: socials },
    CommandSpec { key: "wget resume", summary: "Download resume", build: wget_resume },
    CommandSpec { key: "cat archives/old_experience.txt", summary: "Archived experiences", build: archived_experience },
    CommandSpec { key: "cat archives/old_projects.txt", summary: "Archived projects", build: archived_projects },
    CommandSpec { key: "ls ./snowyandpluto/", summary: "Snowy and Pluto", build: snowy_and_pluto },
];

/// Static lookup from match key to response builder
pub struct CommandTable;

impl CommandTable {
    pub fn entries() -> &'static [CommandSpec] {
        TABLE
    }

    pub fn lookup(key: &str) -> Option<&'static CommandSpec> {
        TABLE.iter().find(|spec| spec.key == key)
    }
}

/// How an input line is going to be handled
#[derive(Debug)]
pub enum Resolution {
    /// Blank input: nothing happens
    Empty,
    Clear,
    /// Greeting word: redirect message, chat opens after a deferral
    Greeting,
    OpenChat,
    Table(&'static CommandSpec),
    /// `chat <message>`; the message keeps its original casing
    Chat(String),
    NotFound,
}

/// Classify raw input following the matching precedence
pub fn resolve(raw: &str) -> Resolution {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Resolution::Empty;
    }

    let key = trimmed.to_lowercase();
    if key == CLEAR {
        return Resolution::Clear;
    }
    if GREETINGS.contains(&key.as_str()) {
        return Resolution::Greeting;
    }
    if OPEN_CHAT.contains(&key.as_str()) {
        return Resolution::OpenChat;
    }
    if let Some(spec) = CommandTable::lookup(&key) {
        return Resolution::Table(spec);
    }
    if key.starts_with(CHAT_PREFIX) {
        return Resolution::Chat(trimmed.get(CHAT_PREFIX.len()..).unwrap_or_default().to_string());
    }
    Resolution::NotFound
}

pub fn redirect() -> ResponseDescriptor {
    ResponseDescriptor::Structured(Block::styled(REDIRECT_MESSAGE, Tone::Warning))
}

pub fn chat_opened() -> ResponseDescriptor {
    ResponseDescriptor::Structured(Block::group(vec![
        Block::styled("💬 Chat application opened!", Tone::Primary),
        Block::styled(
            "A new chat window has been launched. Get yourself a cup of chai and talk with it.",
            Tone::Muted,
        ),
    ]))
}

pub fn chat_exchange(message: &str) -> ResponseDescriptor {
    ResponseDescriptor::Structured(Block::group(vec![
        Block::line(vec![Inline::styled("You:", Tone::Muted), Inline::text(format!(" {}", message))]),
        Block::line(vec![Inline::styled(" AI:", Tone::Primary), Inline::text(format!(" {}", CHAT_REPLY))]),
    ]))
}

/// Not-found message naming the raw input verbatim
pub fn not_found(raw: &str) -> ResponseDescriptor {
    ResponseDescriptor::PlainText(format!("Command not found: {}. Type 'help' for available commands.", raw))
}

/// The synthetic entry shown at startup and after `clear`
pub fn welcome(terminal: &TerminalConfig) -> ResponseDescriptor {
    let mut lines = vec![Block::heading(&terminal.welcome_title)];
    lines.extend(terminal.welcome_lines.iter().map(|l| Block::styled(l, Tone::Muted)));
    ResponseDescriptor::Structured(Block::group(lines))
}

fn help(_: &Profile) -> ResponseDescriptor {
    let mut lines = vec![Block::heading("Available Commands:")];
    for (command, description) in HELP_ENTRIES {
        lines.push(Block::line(vec![
            Inline::command(*command, *command),
            Inline::text(format!(" — {}", description)),
        ]));
    }
    ResponseDescriptor::Structured(Block::group(lines))
}

fn pwd(profile: &Profile) -> ResponseDescriptor {
    let mut lines = vec![Block::styled(&profile.home, Tone::Success), Block::text(".")];
    tree_lines(&profile.tree, &mut Vec::new(), &mut lines);
    lines.push(Block::line(vec![
        Inline::styled("Tip: Use ", Tone::Muted),
        Inline::command(ARCHIVED_PROJECTS, ARCHIVED_PROJECTS),
        Inline::styled(" to view archived projects", Tone::Muted),
    ]));
    ResponseDescriptor::Structured(Block::group(lines))
}

/// Render `nodes` as `├──`/`└──` rows; `ancestors` records whether each enclosing level was the last entry
fn tree_lines(nodes: &[TreeNode], ancestors: &mut Vec<bool>, out: &mut Vec<Block>) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let mut prefix: String = ancestors.iter().map(|&was_last| if was_last { "      " } else { "│     " }).collect();
        prefix.push_str(if last { "└── " } else { "├── " });

        let tone = if node.is_dir() { Tone::Accent } else { Tone::Normal };
        out.push(Block::line(vec![Inline::styled(prefix, Tone::Accent), Inline::styled(&node.name, tone)]));

        if !node.children.is_empty() {
            ancestors.push(last);
            tree_lines(&node.children, ancestors, out);
            ancestors.pop();
        }
    }
}

fn about(profile: &Profile) -> ResponseDescriptor {
    let about = &profile.about;
    let mut steps = vec![
        RevealStep::delayed(Block::image(&about.portrait.alt, &about.portrait.source), 200),
        RevealStep::typed(
            Block::group(vec![Block::heading(&profile.name), Block::styled("Profile Picture", Tone::Muted)]),
            30,
        )
        .quiet(),
    ];

    let intro = match &about.intro_link {
        Some(link) => match about.intro.split_once(&link.label) {
            Some((before, after)) => {
                Block::line(vec![Inline::text(before), Inline::link(&link.label, &link.href), Inline::text(after)])
            }
            None => Block::text(&about.intro),
        },
        None => Block::text(&about.intro),
    };
    steps.push(RevealStep::typed(intro, 20));
    steps.push(RevealStep::typed(Block::heading(&about.prelude), 30));

    for highlight in &about.highlights {
        let block = match highlight.split_action() {
            Some((before, label, command, after)) => {
                Block::line(vec![Inline::text(before), Inline::command(label, command), Inline::text(after)])
            }
            None => Block::text(&highlight.text),
        };
        steps.push(RevealStep::typed(block, 25));
    }

    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn projects(profile: &Profile) -> ResponseDescriptor {
    let blurb = &profile.projects;
    let mut lines = vec![Block::heading("Projects")];
    lines.extend(blurb.paragraphs.iter().map(|p| Block::styled(p, Tone::Muted)));
    lines.push(Block::Blank);

    let mut teaser = vec![Inline::styled(&blurb.teaser, Tone::Success)];
    if let Some(link) = &blurb.teaser_link {
        teaser.push(Inline::text(" "));
        teaser.push(Inline::link(&link.label, &link.href));
    }
    lines.push(Block::line(teaser));
    lines.push(Block::Blank);
    lines.push(Block::line(vec![
        Inline::styled("Check out my ", Tone::Muted),
        Inline::command("archived projects", ARCHIVED_PROJECTS),
        Inline::styled(" for personal projects from earlier work.", Tone::Muted),
    ]));

    ResponseDescriptor::Structured(Block::group(lines))
}

fn role_steps(role: &Role, steps: &mut Vec<RevealStep>) {
    if let Some(logo) = &role.logo {
        steps.push(RevealStep::delayed(Block::image(&logo.alt, &logo.source), 200));
    }
    steps.push(RevealStep::typed(
        Block::group(vec![Block::styled(role.heading(), Tone::Accent), Block::styled(role.subtitle(), Tone::Muted)]),
        25,
    ));
    if !role.bullets.is_empty() {
        let bullets = role.bullets.iter().map(|b| Block::text(format!("  - {}", b))).collect();
        steps.push(RevealStep::typed(Block::group(bullets), 20));
    }
}

fn experience(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![RevealStep::typed(Block::heading("Experience"), 30)];
    profile.experience.iter().for_each(|role| role_steps(role, &mut steps));

    if !profile.archived_experience.is_empty() {
        steps.push(RevealStep::typed(
            Block::group(vec![
                Block::styled("📁 More Experiences Available", Tone::Warning),
                Block::line(vec![
                    Inline::text("Check out my "),
                    Inline::command("archived experiences", ARCHIVED_EXPERIENCE),
                    Inline::text(" for additional work history and non-internship roles."),
                ]),
            ]),
            30,
        ));
    }

    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn activities(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![RevealStep::typed(Block::heading("Activities & Leadership"), 30)];
    profile.activities.iter().for_each(|role| role_steps(role, &mut steps));
    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn archived_experience(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![
        RevealStep::typed(
            Block::group(vec![
                Block::heading("📁 Archived Experiences"),
                Block::styled("Non-internship experiences", Tone::Muted),
            ]),
            30,
        )
        .quiet(),
    ];
    profile.archived_experience.iter().for_each(|role| role_steps(role, &mut steps));
    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn archived_projects(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![
        RevealStep::typed(
            Block::group(vec![
                Block::heading("📁 Archived Projects"),
                Block::styled("Personal projects from my earlier work", Tone::Muted),
            ]),
            30,
        )
        .quiet(),
    ];

    for project in &profile.archived_projects {
        steps.push(RevealStep::typed(Block::styled(&project.title, Tone::Accent), 25));
        if !project.tags.is_empty() {
            steps.push(RevealStep::instant(Block::tags(project.tags.iter())));
        }
        let bullets = project.bullets.iter().map(|b| Block::styled(format!("  → {}", b), Tone::Muted)).collect();
        steps.push(RevealStep::typed(Block::group(bullets), 20));
    }

    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn education(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![RevealStep::typed(Block::heading("Education"), 30)];
    for school in &profile.education {
        if let Some(logo) = &school.logo {
            steps.push(RevealStep::delayed(Block::image(&logo.alt, &logo.source), 200));
        }
        steps.push(RevealStep::typed(
            Block::group(vec![
                Block::styled(format!("{} — {}", school.institution, school.location), Tone::Accent),
                Block::styled(&school.details, Tone::Muted),
            ]),
            25,
        ));
    }
    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn achievements(profile: &Profile) -> ResponseDescriptor {
    let mut lines = vec![Block::heading("Awards & Achievements")];
    lines.extend(profile.achievements.iter().map(|a| Block::text(format!("- {}", a))));
    ResponseDescriptor::Structured(Block::group(lines))
}

fn skills(profile: &Profile) -> ResponseDescriptor {
    let mut steps = vec![RevealStep::typed(Block::heading("./skills/"), 30)];
    for group in &profile.skills {
        steps.push(RevealStep::typed(Block::styled(format!("{}/", group.name), Tone::Accent), 25));
        steps.push(RevealStep::instant(Block::tags(group.items.iter())));
    }
    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

fn socials(profile: &Profile) -> ResponseDescriptor {
    let mut lines = vec![Block::heading("Social Links")];
    for social in &profile.socials {
        lines.push(Block::line(vec![
            Inline::styled(format!("{}:", social.label), Tone::Accent),
            Inline::text(" "),
            Inline::link(&social.value, &social.href),
        ]));
    }
    ResponseDescriptor::Structured(Block::group(lines))
}

fn wget_resume(_: &Profile) -> ResponseDescriptor {
    ResponseDescriptor::AnimatedTransfer(TransferKind::ResumeDownload)
}

fn snowy_and_pluto(profile: &Profile) -> ResponseDescriptor {
    let pets = &profile.pets;
    let mut steps = vec![
        RevealStep::typed(Block::heading("./snowyandpluto/"), 40).quiet(),
        RevealStep::delayed(Block::image(&pets.together.alt, &pets.together.source), 300),
        RevealStep::typed(
            Block::group(vec![
                Block::styled("snowyandpluto.png", Tone::Accent),
                Block::styled(&pets.caption, Tone::Muted),
            ]),
            25,
        )
        .quiet(),
    ];

    for (i, pet) in pets.members.iter().enumerate() {
        steps.push(RevealStep::delayed(Block::image(&pet.image.alt, &pet.image.source), 400 + 100 * i as u64));
        steps.push(RevealStep::typed(Block::styled(format!("{}.png", pet.name), Tone::Accent), 25).quiet());
        steps.push(RevealStep::typed(Block::text(&pet.story), 20).quiet());
    }

    ResponseDescriptor::StagedReveal(StagedReveal::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::load_builtin().unwrap()
    }

    fn build(key: &str) -> ResponseDescriptor {
        (CommandTable::lookup(key).unwrap().build)(&profile())
    }

    #[test]
    fn test_table_keys_are_normalized_and_unique() {
        let keys: Vec<_> = CommandTable::entries().iter().map(|s| s.key).collect();
        for key in &keys {
            assert_eq!(*key, key.trim().to_lowercase());
            assert_eq!(keys.iter().filter(|k| *k == key).count(), 1, "duplicate key {}", key);
        }
        assert_eq!(keys.len(), 14);
    }

    #[test]
    fn test_menu_and_help_commands_resolve() {
        for (command, _) in MENU_COMMANDS.iter().chain(HELP_ENTRIES) {
            assert!(!matches!(resolve(command), Resolution::NotFound | Resolution::Empty), "{}", command);
        }
        assert_eq!(MENU_COMMANDS.len(), 10);
    }

    #[test]
    fn test_resolve_precedence() {
        assert!(matches!(resolve(""), Resolution::Empty));
        assert!(matches!(resolve("   "), Resolution::Empty));
        assert!(matches!(resolve("  CLEAR "), Resolution::Clear));
        assert!(matches!(resolve("Hello"), Resolution::Greeting));
        assert!(matches!(resolve("greetings"), Resolution::Greeting));
        assert!(matches!(resolve("open -a \"chai chat\""), Resolution::OpenChat));
        assert!(matches!(resolve("open -a chai chat"), Resolution::OpenChat));
        assert!(matches!(resolve(" OPEN -a \"Chai Chat\" "), Resolution::OpenChat));
        assert!(matches!(resolve("Cat About.txt"), Resolution::Table(spec) if spec.key == "cat about.txt"));
        assert!(matches!(resolve("foo bar"), Resolution::NotFound));
        assert!(matches!(resolve("hi there"), Resolution::NotFound));
    }

    #[test]
    fn test_chat_prefix_keeps_casing() {
        match resolve("  Chat Hello There ") {
            Resolution::Chat(message) => assert_eq!(message, "Hello There"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(resolve("chat"), Resolution::NotFound));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            not_found("foo bar").plain_text(),
            "Command not found: foo bar. Type 'help' for available commands."
        );
    }

    #[test]
    fn test_chat_exchange_contains_message() {
        let text = chat_exchange("hello there").plain_text();
        assert_eq!(text, "You: hello there\n AI: hi");
    }

    #[test]
    fn test_help_lists_commands_as_triggers() {
        let response = build("help");
        let commands = response.commands();
        assert_eq!(commands.len(), HELP_ENTRIES.len());
        assert!(commands.contains(&"wget resume"));
        assert!(response.plain_text().starts_with("Available Commands:\npwd — View directory structure"));
    }

    #[test]
    fn test_pwd_tree_layout() {
        let text = build("pwd").plain_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "~ / neel / portfolio");
        assert_eq!(lines[1], ".");
        assert_eq!(lines[2], "├── Applications/");
        assert_eq!(lines[3], "│     └── chai chat.app");
        assert!(lines.contains(&"│     ├── old_experience.txt"));
        assert!(lines.contains(&"│     └── other"));
        assert_eq!(lines[lines.len() - 2], "└── socials/");
        assert!(lines[lines.len() - 1].starts_with("Tip: Use cat archives/old_projects.txt"));
    }

    #[test]
    fn test_about_embeds_pets_command() {
        let response = build("cat about.txt");
        assert!(matches!(response, ResponseDescriptor::StagedReveal(_)));
        assert_eq!(response.commands(), vec!["ls ./snowyandpluto/"]);
        assert!(response.plain_text().contains("Perpetually caffeinated"));
    }

    #[test]
    fn test_projects_links_to_archive() {
        let response = build("cd projects");
        assert_eq!(response.commands(), vec![ARCHIVED_PROJECTS]);
        assert!(response.plain_text().contains("6ixsense.com"));
    }

    #[test]
    fn test_experience_links_to_archive() {
        let response = build("cat experience.txt");
        assert_eq!(response.commands(), vec![ARCHIVED_EXPERIENCE]);
        assert!(response.plain_text().contains("Data Science Intern, PSP Investments"));
    }

    #[test]
    fn test_skills_use_tags() {
        let ResponseDescriptor::StagedReveal(staged) = build("ls ./skills/") else {
            panic!("skills should be staged");
        };
        assert_eq!(staged.len(), 1 + 2 * 6);
        assert!(staged.steps.iter().any(|s| matches!(&s.block, Block::Tags { tags } if tags.contains(&"Rust".to_string()))));
    }

    #[test]
    fn test_achievements_and_socials() {
        assert_eq!(
            build("cat achievements.txt").plain_text(),
            "Awards & Achievements\n- International Scholar ($100,000)\n- MRN Scholarship\n- INMC Perfect Score ($1,000)"
        );
        assert!(build("whereis socials").plain_text().contains("GitHub: github.com/n33levo"));
    }

    #[test]
    fn test_wget_is_animated_transfer() {
        assert_eq!(build("wget resume"), ResponseDescriptor::AnimatedTransfer(TransferKind::ResumeDownload));
    }

    #[test]
    fn test_pet_images_are_delayed_progressively() {
        let ResponseDescriptor::StagedReveal(staged) = build("ls ./snowyandpluto/") else {
            panic!("pets should be staged");
        };
        let delays: Vec<_> = staged
            .steps
            .iter()
            .filter_map(|s| match s.mode {
                crate::response::RevealMode::Delayed { delay_ms } => Some(delay_ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![300, 400, 500]);
    }

    #[test]
    fn test_welcome_uses_config() {
        let welcome = welcome(&TerminalConfig::default());
        assert!(welcome.plain_text().starts_with("Welcome to n33l's Portfolio\nType 'help'"));
    }

    #[test]
    fn test_every_table_entry_builds() {
        let profile = profile();
        for spec in CommandTable::entries() {
            let response = (spec.build)(&profile);
            if !matches!(response, ResponseDescriptor::AnimatedTransfer(_)) {
                assert!(!response.plain_text().is_empty(), "{} built empty output", spec.key);
            }
        }
    }
}
