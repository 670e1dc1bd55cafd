//! Local auth store adapter
//!
//! Persistence of remembered credentials is owned by the host environment;
//! the selector only reads preferred-account hints and cached credential
//! pairs, and writes one entry on an explicit "remember" submit. This
//! module defines that seam as the [`AuthStore`] trait plus two
//! implementations: a JSON-file store and an in-memory store for ephemeral
//! sessions and tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::types::AuthInfo;
use crate::errors::AppError;
use crate::infra::auth_store_path;

/// Seam to the externally-owned credential cache
///
/// Lookups treat "nothing stored" as a normal empty result, never an
/// error. Only the write path is fallible.
pub trait AuthStore {
    /// Account id remembered from the last login against `asset_id`,
    /// if any. Feeds the "Last login" group.
    fn preferred_account_id(&self, asset_id: &str) -> Option<String>;

    /// Cached credentials for `asset_id` whose username (case-insensitive)
    /// or account id equals `key`, most recent first.
    fn local_auth(&self, asset_id: &str, key: &str) -> Vec<AuthInfo>;

    /// Persists `auth` for (`asset_id`, `account_id`) and records the
    /// account as the preferred one for the asset.
    fn save_auth(&self, asset_id: &str, account_id: &str, auth: &AuthInfo) -> Result<(), AppError>;
}

/// One remembered credential
#[derive(Debug, Serialize, Deserialize, Clone)]
struct SavedAuth {
    account_id: String,
    username: String,
    secret: String,
    /// RFC 3339 timestamp of the save
    saved_at: String,
}

impl SavedAuth {
    fn matches(&self, key: &str) -> bool {
        self.username.eq_ignore_ascii_case(key) || self.account_id == key
    }

    fn auth_info(&self) -> AuthInfo {
        AuthInfo {
            username: self.username.clone(),
            secret: self.secret.clone(),
        }
    }
}

/// Per-asset slice of the store file
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct AssetAuth {
    #[serde(default)]
    preferred_account: Option<String>,
    #[serde(default)]
    entries: Vec<SavedAuth>,
}

/// On-disk layout of the store file
#[derive(Debug, Serialize, Deserialize, Default)]
struct StoreFile {
    #[serde(default)]
    assets: HashMap<String, AssetAuth>,
}

/// JSON-file backed [`AuthStore`]
///
/// The whole file is read per operation and rewritten on save; the store
/// holds a handful of entries per asset, never enough to warrant anything
/// heavier. Read failures degrade to "nothing stored" with an error log;
/// a save against an unreadable file fails instead of clobbering it.
pub struct JsonFileAuthStore {
    path: PathBuf,
}

impl JsonFileAuthStore {
    /// Creates a store over an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default per-user location
    ///
    /// # Failure Modes
    /// - No resolvable data directory (see `infra::paths`)
    /// - Data directory cannot be created
    pub fn at_default_location() -> Result<Self, AppError> {
        Ok(Self::new(auth_store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreFile, AppError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| AppError::IoError {
            path: self.path.to_string_lossy().to_string(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| AppError::JsonError {
            context: "local auth store".to_string(),
            source: e,
        })
    }

    fn load_or_empty(&self) -> StoreFile {
        match self.load() {
            Ok(file) => file,
            Err(e) => {
                error!(
                    path = ?self.path,
                    error = %e,
                    "failed to read local auth store, treating as empty"
                );
                StoreFile::default()
            }
        }
    }

    fn persist(&self, file: &StoreFile) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::IoError {
                path: parent.to_string_lossy().to_string(),
                source: e,
            })?;
        }
        let contents = serde_json::to_string_pretty(file).map_err(|e| AppError::JsonError {
            context: "local auth store".to_string(),
            source: e,
        })?;
        fs::write(&self.path, contents).map_err(|e| AppError::IoError {
            path: self.path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

impl AuthStore for JsonFileAuthStore {
    fn preferred_account_id(&self, asset_id: &str) -> Option<String> {
        self.load_or_empty()
            .assets
            .get(asset_id)
            .and_then(|asset| asset.preferred_account.clone())
    }

    fn local_auth(&self, asset_id: &str, key: &str) -> Vec<AuthInfo> {
        let file = self.load_or_empty();
        let matches: Vec<AuthInfo> = file
            .assets
            .get(asset_id)
            .map(|asset| {
                asset
                    .entries
                    .iter()
                    .filter(|entry| entry.matches(key))
                    .map(SavedAuth::auth_info)
                    .collect()
            })
            .unwrap_or_default();
        debug!(
            asset_id,
            key,
            match_count = matches.len(),
            "looked up cached credentials"
        );
        matches
    }

    fn save_auth(&self, asset_id: &str, account_id: &str, auth: &AuthInfo) -> Result<(), AppError> {
        let mut file = self.load()?;
        let asset = file.assets.entry(asset_id.to_string()).or_default();

        // Upsert by account id: newest entry goes to the front
        asset.entries.retain(|entry| entry.account_id != account_id);
        asset.entries.insert(
            0,
            SavedAuth {
                account_id: account_id.to_string(),
                username: auth.username.clone(),
                secret: auth.secret.clone(),
                saved_at: Utc::now().to_rfc3339(),
            },
        );
        asset.preferred_account = Some(account_id.to_string());

        self.persist(&file)?;

        // Never log the secret itself, only its length
        debug!(
            asset_id,
            account_id,
            username = %auth.username,
            secret_len = auth.secret.len(),
            "saved credential to local auth store"
        );
        Ok(())
    }
}

/// In-memory [`AuthStore`] for ephemeral sessions and tests
///
/// Tracks how many saves were performed so tests can assert the
/// remember-auth hook fires exactly once per submit.
#[derive(Default)]
pub struct MemoryAuthStore {
    assets: RefCell<HashMap<String, AssetAuth>>,
    save_count: Cell<usize>,
}

impl MemoryAuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a cached credential without counting it as a save
    pub fn seed_auth(&self, asset_id: &str, account_id: &str, username: &str, secret: &str) {
        let mut assets = self.assets.borrow_mut();
        let asset = assets.entry(asset_id.to_string()).or_default();
        asset.entries.insert(
            0,
            SavedAuth {
                account_id: account_id.to_string(),
                username: username.to_string(),
                secret: secret.to_string(),
                saved_at: Utc::now().to_rfc3339(),
            },
        );
    }

    /// Seeds the preferred account for an asset
    pub fn seed_preferred(&self, asset_id: &str, account_id: &str) {
        self.assets
            .borrow_mut()
            .entry(asset_id.to_string())
            .or_default()
            .preferred_account = Some(account_id.to_string());
    }

    /// Number of `save_auth` calls performed
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl AuthStore for MemoryAuthStore {
    fn preferred_account_id(&self, asset_id: &str) -> Option<String> {
        self.assets
            .borrow()
            .get(asset_id)
            .and_then(|asset| asset.preferred_account.clone())
    }

    fn local_auth(&self, asset_id: &str, key: &str) -> Vec<AuthInfo> {
        self.assets
            .borrow()
            .get(asset_id)
            .map(|asset| {
                asset
                    .entries
                    .iter()
                    .filter(|entry| entry.matches(key))
                    .map(SavedAuth::auth_info)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn save_auth(&self, asset_id: &str, account_id: &str, auth: &AuthInfo) -> Result<(), AppError> {
        self.save_count.set(self.save_count.get() + 1);
        let mut assets = self.assets.borrow_mut();
        let asset = assets.entry(asset_id.to_string()).or_default();
        asset.entries.retain(|entry| entry.account_id != account_id);
        asset.entries.insert(
            0,
            SavedAuth {
                account_id: account_id.to_string(),
                username: auth.username.clone(),
                secret: auth.secret.clone(),
                saved_at: Utc::now().to_rfc3339(),
            },
        );
        asset.preferred_account = Some(account_id.to_string());
        Ok(())
    }
}
