//! JSON-file persistence for the user registry.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::user::User;

use super::{Result, UserRepository};

const TMP_SUFFIX: &str = "tmp";
const DEFAULT_FILE_NAME: &str = "users.json";
const APP_DIR_NAME: &str = "finance_core";

/// On-disk document shape: a flat list of users. The registry key (lowercased
/// login) is derived on load rather than persisted.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredUsers {
    #[serde(default)]
    users: Vec<User>,
}

/// File-backed repository writing pretty JSON via a tmp-file-then-rename step.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    path: PathBuf,
}

impl JsonUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory, falling back to the current
    /// directory when none is available.
    pub fn new_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR_NAME).join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserRepository for JsonUserStore {
    fn load_all(&self) -> Result<BTreeMap<String, User>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "user store missing, starting empty");
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let stored: StoredUsers = serde_json::from_str(&data)?;
        let mut users = BTreeMap::new();
        for user in stored.users {
            users.insert(user.key(), user);
        }
        tracing::debug!(count = users.len(), "loaded user store");
        Ok(users)
    }

    fn save_all(&self, users: &BTreeMap<String, User>) -> Result<()> {
        let stored = StoredUsers {
            users: users.values().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(count = stored.users.len(), path = %self.path.display(), "saved user store");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
