//! Translation lookup for user-visible labels
//!
//! Group names and input placeholders go through a [`Translator`] so hosts
//! can plug their own localization in. The built-in [`Catalog`] serves the
//! embedded English bundle; unknown keys fall back to identity translation,
//! and a malformed bundle degrades to an empty catalog with one error log
//! at load time.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;
use tracing::error;

/// Key-to-text lookup for user-visible labels
pub trait Translator {
    /// Translated text for `key`; implementations fall back to the key
    /// itself when no translation exists.
    fn translate(&self, key: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct TranslationFile {
    #[serde(default)]
    messages: HashMap<String, String>,
}

/// Message catalog backed by an embedded JSON bundle
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Catalog {
    /// Parses a raw bundle; a parse failure degrades to an empty catalog.
    pub fn from_bundle(raw: &str) -> Self {
        match serde_json::from_str::<TranslationFile>(raw) {
            Ok(file) => Self {
                messages: file.messages,
            },
            Err(err) => {
                error!(error = %err, "failed to parse translation bundle, using identity translations");
                Self::default()
            }
        }
    }

    /// The embedded English catalog, shared per thread.
    pub fn shared() -> Rc<Catalog> {
        thread_local! {
            static EMBEDDED: Rc<Catalog> = Rc::new(Catalog::from_bundle(include_str!(
                concat!(env!("CARGO_MANIFEST_DIR"), "/i18n/en.json")
            )));
        }
        EMBEDDED.with(Rc::clone)
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_has_group_labels() {
        let catalog = Catalog::shared();
        assert_eq!(catalog.translate("Last login"), "Last login");
        assert_eq!(catalog.translate("Normal accounts"), "Normal accounts");
        assert_eq!(catalog.translate("Username@Domain"), "Username@Domain");
    }

    #[test]
    fn test_unknown_key_falls_back_to_identity() {
        let catalog = Catalog::shared();
        assert_eq!(catalog.translate("No such key"), "No such key");
    }

    #[test]
    fn test_malformed_bundle_degrades_to_identity() {
        let catalog = Catalog::from_bundle("not json");
        assert_eq!(catalog.translate("Last login"), "Last login");
    }
}
