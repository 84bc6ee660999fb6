//! Source-vocabulary → target-vocabulary lookup.
//!
//! Two layers are consulted in order: the user's override store, then the
//! built-in table. The layers are never merged, so overrides stay editable
//! while the built-in table is fixed.

mod builtin;

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use crate::store::{OverrideStore, StoreError};
use crate::term_normalizer::normalize;

pub use builtin::BUILTIN_TABLE;

/// Outcome of a lookup. `succeeded == false` is a normal result: the
/// normalized source term stands in as the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub target_term: String,
    pub succeeded: bool,
}

pub struct TranslationTable<S: OverrideStore> {
    overrides: S,
    builtin: HashMap<String, String>,
}

impl<S: OverrideStore> TranslationTable<S> {
    pub fn new(overrides: S) -> Self {
        Self::with_builtin(overrides, BUILTIN_TABLE)
    }

    pub fn with_builtin(overrides: S, entries: &[(&str, &str)]) -> Self {
        let builtin = entries
            .iter()
            .map(|(source, target)| (normalize(source), normalize(target)))
            .collect();
        Self { overrides, builtin }
    }

    pub fn resolve(&self, source_term: &str) -> Resolution {
        let key = normalize(source_term);

        if let Some(target) = self.override_for(&key) {
            return Resolution {
                target_term: target,
                succeeded: true,
            };
        }

        if let Some(target) = self.builtin.get(&key) {
            return Resolution {
                target_term: target.clone(),
                succeeded: true,
            };
        }

        debug!(term = %key, "no translation found");
        Resolution {
            target_term: key,
            succeeded: false,
        }
    }

    /// Stores `source → target`, replacing any earlier override for the same source.
    ///
    /// Returns `Ok(false)` without touching the store when either side
    /// normalizes to an empty string.
    pub fn add_override(&self, source_term: &str, target_term: &str) -> Result<bool, StoreError> {
        let key = normalize(source_term);
        let target = normalize(target_term);
        if key.is_empty() || target.is_empty() {
            warn!(source = %key, target = %target, "ignoring override with an empty side");
            return Ok(false);
        }
        self.overrides.put(&key, &target)?;
        debug!(source = %key, target = %target, "translation override stored");
        Ok(true)
    }

    pub fn overrides(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.overrides.all()
    }

    /// Source term that translates to `target_term`, overrides first.
    ///
    /// When several sources share a target the lexicographically smallest wins.
    pub fn reverse_lookup(&self, target_term: &str) -> Option<String> {
        let target = normalize(target_term);
        if target.is_empty() {
            return None;
        }
        match self.overrides.all() {
            Ok(overrides) => {
                if let Some((source, _)) = overrides.iter().find(|(_, t)| **t == target) {
                    return Some(source.clone());
                }
            }
            Err(e) => warn!(error = %e, "override store unreadable, using built-in table only"),
        }
        self.builtin
            .iter()
            .filter(|(_, t)| **t == target)
            .map(|(source, _)| source)
            .min()
            .cloned()
    }

    fn override_for(&self, key: &str) -> Option<String> {
        match self.overrides.get(key) {
            Ok(Some(target)) if !target.is_empty() => Some(target),
            Ok(_) => None,
            Err(e) => {
                warn!(term = %key, error = %e, "override lookup failed, falling back to built-in table");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOverrideStore;

    struct BrokenStore;

    impl OverrideStore for BrokenStore {
        fn get(&self, _source: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Poisoned("test"))
        }
        fn put(&self, _source: &str, _target: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned("test"))
        }
        fn all(&self) -> Result<BTreeMap<String, String>, StoreError> {
            Err(StoreError::Poisoned("test"))
        }
    }

    #[test]
    fn test_builtin_lookup_normalizes_input() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        let resolution = table.resolve("  בצל ");
        assert_eq!(
            resolution,
            Resolution {
                target_term: "onion".to_string(),
                succeeded: true
            }
        );
    }

    #[test]
    fn test_unknown_term_falls_back_to_normalized_source() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        let resolution = table.resolve("  Za'atar ");
        assert_eq!(resolution.target_term, "za'atar");
        assert!(!resolution.succeeded);
    }

    #[test]
    fn test_override_takes_precedence_over_builtin() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        assert_eq!(table.resolve("בצל").target_term, "onion");

        assert!(table.add_override("בצל", "Red Onion").unwrap());
        let resolution = table.resolve("בצל");
        assert_eq!(resolution.target_term, "red onion");
        assert!(resolution.succeeded);
    }

    #[test]
    fn test_add_override_replaces_existing_key() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        table.add_override(" חציל", "aubergine").unwrap();
        table.add_override("חציל ", "Eggplant").unwrap();
        assert_eq!(table.resolve("חציל").target_term, "eggplant");
        assert_eq!(table.overrides().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_stored_override_is_ignored() {
        let store = MemoryOverrideStore::new();
        store.put("בצל", "").unwrap();
        let table = TranslationTable::new(store);
        assert_eq!(table.resolve("בצל").target_term, "onion");
    }

    #[test]
    fn test_add_override_rejects_empty_target() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        assert!(!table.add_override("חציל", "   ").unwrap());
        assert!(!table.resolve("חציל").succeeded);
    }

    #[test]
    fn test_broken_override_store_still_resolves_builtin() {
        let table = TranslationTable::new(BrokenStore);
        assert_eq!(table.resolve("שום").target_term, "garlic");
        assert!(!table.resolve("חציל").succeeded);
        assert!(table.add_override("חציל", "eggplant").is_err());
        assert_eq!(table.reverse_lookup("garlic").as_deref(), Some("שום"));
    }

    #[test]
    fn test_reverse_lookup_prefers_overrides() {
        let table = TranslationTable::new(MemoryOverrideStore::new());
        assert_eq!(table.reverse_lookup("Onion").as_deref(), Some("בצל"));
        assert_eq!(table.reverse_lookup("eggplant"), None);

        table.add_override("חציל", "eggplant").unwrap();
        assert_eq!(table.reverse_lookup("Eggplant").as_deref(), Some("חציל"));
    }
}
