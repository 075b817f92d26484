//! Durable session slot: the signed-in user's identifier, read once at
//! startup and written once per sign-in.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::utils::error::Result;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
}

pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted in the working directory, alongside the config file.
    pub fn default_location() -> Self {
        Self::new("data")
    }

    fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Read the stored session, if any. An absent file is not an error.
    pub fn load(&self) -> Result<Option<Session>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let session = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(self.path(), json)?;
        info!("Stored session for user {}", session.user_id);
        Ok(())
    }
}
