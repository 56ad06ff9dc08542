//! Sender defaults persistence.
//!
//! Defaults are stored under the data directory:
//! ```text
//! <root>/.lettercraft/
//! ├── defaults.json      # { fullName, email, phone }
//! └── signature.txt      # Signature payload (data URL), if any
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lettercraft_templates::SenderDetails;

use crate::error::StoreResult;

const STORE_DIR: &str = ".lettercraft";
const DEFAULTS_FILE: &str = "defaults.json";
const SIGNATURE_FILE: &str = "signature.txt";

/// Sender details remembered between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Defaults {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl Defaults {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }

    /// Sender details prefilled from these defaults.
    pub fn to_details(&self) -> SenderDetails {
        SenderDetails {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            ..Default::default()
        }
    }
}

/// File-backed store for defaults and the signature.
#[derive(Clone)]
pub struct DefaultsStore {
    root: PathBuf,
}

impl DefaultsStore {
    /// Create a store rooted at a data directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the store files.
    pub fn store_dir(&self) -> PathBuf {
        self.root.join(STORE_DIR)
    }

    fn defaults_path(&self) -> PathBuf {
        self.store_dir().join(DEFAULTS_FILE)
    }

    fn signature_path(&self) -> PathBuf {
        self.store_dir().join(SIGNATURE_FILE)
    }

    /// Load saved defaults. Missing or unreadable files yield empty defaults.
    pub fn load(&self) -> Defaults {
        let path = self.defaults_path();
        if !path.exists() {
            debug!("No saved defaults at {:?}", path);
            return Defaults::default();
        }

        match read_defaults(&path) {
            Ok(defaults) => defaults,
            Err(e) => {
                warn!("Failed to load defaults from {:?}: {}", path, e);
                Defaults::default()
            }
        }
    }

    /// Save defaults, creating the store directory if needed.
    pub fn save(&self, defaults: &Defaults) -> StoreResult<()> {
        fs::create_dir_all(self.store_dir())?;
        let content = serde_json::to_string_pretty(defaults)?;
        fs::write(self.defaults_path(), content)?;
        info!("Saved defaults to {:?}", self.defaults_path());
        Ok(())
    }

    /// Load the saved signature payload, if any.
    pub fn load_signature(&self) -> Option<String> {
        let path = self.signature_path();
        match fs::read_to_string(&path) {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
            Ok(_) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to load signature from {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save a signature payload.
    pub fn save_signature(&self, signature: &str) -> StoreResult<()> {
        fs::create_dir_all(self.store_dir())?;
        fs::write(self.signature_path(), signature.trim())?;
        info!("Saved signature");
        Ok(())
    }

    /// Remove the saved signature. Removing a missing signature is a no-op.
    pub fn clear_signature(&self) -> StoreResult<()> {
        match fs::remove_file(self.signature_path()) {
            Ok(()) => {
                info!("Cleared signature");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_defaults(path: &Path) -> StoreResult<Defaults> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
