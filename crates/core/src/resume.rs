//! The real side effect behind `wget resume`: copy a local PDF into the
//! visitor's downloads directory.

use std::path::{Path, PathBuf};

use crate::config::ResumeConfig;
use crate::content::ResumeSpec;
use crate::error::{ResumeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSaver {
    source: PathBuf,
    output_dir: Option<PathBuf>,
}

impl ResumeSaver {
    pub fn new(source: impl Into<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        Self { source: source.into(), output_dir }
    }

    pub fn from_config(config: &ResumeConfig) -> Self {
        Self::new(config.source.clone(), config.output_dir.clone())
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Configured directory, else the platform downloads dir, else the working dir
    pub fn destination_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = dirs::download_dir() {
            return Ok(dir);
        }
        std::env::current_dir().map_err(|_| ResumeError::NoDestination.into())
    }

    /// Copy the source PDF as `resume.file_name`; returns the written path
    pub fn save(&self, resume: &ResumeSpec) -> Result<PathBuf> {
        if !self.source.is_file() {
            return Err(ResumeError::SourceMissing(self.source.clone()).into());
        }

        let dir = self.destination_dir()?;
        let target = dir.join(&resume.file_name);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ResumeError::CopyFailed { path: target.clone(), reason: e.to_string() })?;
        std::fs::copy(&self.source, &target)
            .map_err(|e| ResumeError::CopyFailed { path: target.clone(), reason: e.to_string() })?;

        tracing::info!(path = %target.display(), "resume saved");
        Ok(target)
    }
}
