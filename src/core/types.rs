//! Core domain types for account selection

use serde::{Deserialize, Serialize};

/// Usernames starting with this prefix mark "special" accounts, kept in a
/// category of their own and never offered as concrete login names.
pub const SPECIAL_PREFIX: char = '@';

/// Sentinel username of an account whose login name must be typed manually.
pub const MANUAL_INPUT_USERNAME: &str = "@INPUT";

/// Username that logs in through a domain, so the manual username input
/// switches to the domain-qualified placeholder.
pub const DOMAIN_LOGIN_USERNAME: &str = "rdp";

/// A credential identity usable to authenticate to an asset
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable identifier; account identity is compared by id only
    pub id: String,
    /// Display name shown in the account list
    pub name: String,
    /// Login name; `@`-prefixed values are sentinels, not real usernames
    pub username: String,
    /// Whether the account carries a server-side secret
    pub has_secret: bool,
}

impl Account {
    /// Identity comparison, by id only (display fields may differ)
    pub fn same_identity(&self, other: &Account) -> bool {
        self.id == other.id
    }

    /// True when the username is a category sentinel rather than a
    /// concrete login name
    pub fn is_special(&self) -> bool {
        self.username.starts_with(SPECIAL_PREFIX)
    }
}

/// The remote target being connected to
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub address: String,
}

/// A manually entered or locally cached credential pair
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AuthInfo {
    pub username: String,
    pub secret: String,
}

/// A named, ordered bucket of accounts shown as one section of the
/// selection list. Derived state; recomputed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountGroup {
    pub name: String,
    pub accounts: Vec<Account>,
}
