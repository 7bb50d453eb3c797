//! File-backed bearer token.
//!
//! The token is read on every call so a `login` in another process is
//! picked up without restarting the session.

use chatdock_core::CredentialStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::Config;

#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/chatdock/token`.
    pub fn default_location() -> anyhow::Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("token")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, token: &str) -> anyhow::Result<()> {
        let token = token.trim();
        if token.is_empty() {
            anyhow::bail!("Refusing to save an empty token");
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        info!("Saved token to {}", self.path.display());
        Ok(())
    }

    /// Remove the stored token. Missing files are fine.
    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed token at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl CredentialStore for TokenFile {
    fn token(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                (!token.is_empty()).then(|| token.to_string())
            }
            Err(e) => {
                debug!("No token at {}: {e}", self.path.display());
                None
            }
        }
    }
}
