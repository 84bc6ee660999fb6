use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::store::{OverrideStore, StoreError};
use crate::term_normalizer::normalize;
use crate::translation::TranslationTable;

/// A pantry entry in the user's vocabulary, with its best-effort translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PantryTerm {
    pub source_term: String,
    /// Never empty: falls back to `source_term` when no translation exists.
    pub target_term: String,
    pub resolved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(PantryTerm),
    AlreadyPresent,
    Empty,
}

/// Result of a manual translation for one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// Stored, and the pantry item was re-resolved.
    Applied(PantryTerm),
    /// Stored for future adds; the term is not in the pantry.
    StoredOnly,
    /// Nothing stored: one side was blank.
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pantry {
    items: Vec<PantryTerm>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PantryTerm] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        let key = normalize(term);
        self.items.iter().any(|item| item.source_term == key)
    }

    /// Adds a term unless it is blank or already present.
    pub fn add<S: OverrideStore>(&mut self, term: &str, table: &TranslationTable<S>) -> AddOutcome {
        let source_term = normalize(term);
        if source_term.is_empty() {
            return AddOutcome::Empty;
        }
        if self.contains(&source_term) {
            info!(term = %source_term, "pantry item already present");
            return AddOutcome::AlreadyPresent;
        }

        let resolution = table.resolve(&source_term);
        if !resolution.succeeded {
            warn!(term = %source_term, "no translation for pantry item, set one manually");
        }
        let item = PantryTerm {
            source_term,
            target_term: resolution.target_term,
            resolved: resolution.succeeded,
        };
        self.items.push(item.clone());
        AddOutcome::Added(item)
    }

    pub fn remove(&mut self, term: &str) -> Option<PantryTerm> {
        let key = normalize(term);
        let position = self.items.iter().position(|item| item.source_term == key)?;
        Some(self.items.remove(position))
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &PantryTerm> {
        self.items.iter().filter(|item| !item.resolved)
    }

    /// Records a manual translation and re-resolves the matching pantry item.
    pub fn apply_override<S: OverrideStore>(
        &mut self,
        source_term: &str,
        target_term: &str,
        table: &TranslationTable<S>,
    ) -> Result<OverrideOutcome, StoreError> {
        if !table.add_override(source_term, target_term)? {
            return Ok(OverrideOutcome::Rejected);
        }
        let key = normalize(source_term);
        let Some(item) = self.items.iter_mut().find(|item| item.source_term == key) else {
            return Ok(OverrideOutcome::StoredOnly);
        };
        reresolve(item, table);
        Ok(OverrideOutcome::Applied(item.clone()))
    }

    /// Translates every item again, e.g. after overrides were imported in bulk.
    /// Returns how many items changed.
    pub fn refresh<S: OverrideStore>(&mut self, table: &TranslationTable<S>) -> usize {
        self.items
            .iter_mut()
            .map(|item| reresolve(item, table))
            .filter(|changed| *changed)
            .count()
    }

    /// Stores every pair as an override, then refreshes the pantry.
    ///
    /// Returns how many overrides were stored and how many items changed.
    pub fn import_overrides<S: OverrideStore>(
        &mut self,
        pairs: &[(String, String)],
        table: &TranslationTable<S>,
    ) -> Result<(usize, usize), StoreError> {
        let mut stored = 0;
        for (source, target) in pairs {
            if table.add_override(source, target)? {
                stored += 1;
            }
        }
        let changed = self.refresh(table);
        info!(stored, changed, "translation overrides imported");
        Ok((stored, changed))
    }

    /// Target-vocabulary terms the matcher treats as owned.
    ///
    /// Every item is translated again so overrides added since the item was
    /// created take effect.
    pub fn owned_target_terms<S: OverrideStore>(&self, table: &TranslationTable<S>) -> BTreeSet<String> {
        self.items
            .iter()
            .map(|item| normalize(&table.resolve(&item.source_term).target_term))
            .filter(|term| !term.is_empty())
            .collect()
    }
}

fn reresolve<S: OverrideStore>(item: &mut PantryTerm, table: &TranslationTable<S>) -> bool {
    let resolution = table.resolve(&item.source_term);
    let changed = item.target_term != resolution.target_term || item.resolved != resolution.succeeded;
    item.target_term = resolution.target_term;
    item.resolved = resolution.succeeded;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOverrideStore;

    fn table() -> TranslationTable<MemoryOverrideStore> {
        TranslationTable::new(MemoryOverrideStore::new())
    }

    #[test]
    fn test_add_translates_and_flags_resolution() {
        let table = table();
        let mut pantry = Pantry::new();

        let AddOutcome::Added(onion) = pantry.add(" בצל ", &table) else {
            panic!("expected onion to be added");
        };
        assert_eq!(onion.target_term, "onion");
        assert!(onion.resolved);

        let AddOutcome::Added(eggplant) = pantry.add("חציל", &table) else {
            panic!("expected eggplant to be added");
        };
        assert_eq!(eggplant.target_term, "חציל");
        assert!(!eggplant.resolved);
        assert_eq!(pantry.unresolved().count(), 1);
    }

    #[test]
    fn test_duplicate_and_blank_are_rejected() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("שום", &table);
        assert_eq!(pantry.add("  שום", &table), AddOutcome::AlreadyPresent);
        assert_eq!(pantry.add("   ", &table), AddOutcome::Empty);
        assert_eq!(pantry.items().len(), 1);
    }

    #[test]
    fn test_apply_override_flips_resolved() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("חציל", &table);

        let OverrideOutcome::Applied(updated) = pantry.apply_override("חציל", "Eggplant", &table).unwrap() else {
            panic!("expected the pantry item to be updated");
        };
        assert_eq!(updated.target_term, "eggplant");
        assert!(updated.resolved);
        assert_eq!(pantry.unresolved().count(), 0);
    }

    #[test]
    fn test_apply_override_for_absent_item_still_stores_it() {
        let table = table();
        let mut pantry = Pantry::new();
        assert_eq!(
            pantry.apply_override("כמון", "cumin", &table).unwrap(),
            OverrideOutcome::StoredOnly
        );

        let AddOutcome::Added(item) = pantry.add("כמון", &table) else {
            panic!("expected cumin to be added");
        };
        assert!(item.resolved);
        assert_eq!(item.target_term, "cumin");
    }

    #[test]
    fn test_blank_override_is_rejected_and_not_stored() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("חציל", &table);

        assert_eq!(pantry.apply_override("חציל", "   ", &table).unwrap(), OverrideOutcome::Rejected);
        assert!(table.overrides().unwrap().is_empty());
        assert_eq!(pantry.unresolved().count(), 1);
    }

    #[test]
    fn test_refresh_picks_up_overrides_stored_elsewhere() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("חציל", &table);
        pantry.add("בצל", &table);

        table.add_override("חציל", "eggplant").unwrap();
        assert!(!pantry.items()[0].resolved);

        assert_eq!(pantry.refresh(&table), 1);
        assert_eq!(pantry.items()[0].target_term, "eggplant");
        assert!(pantry.items()[0].resolved);
        assert_eq!(pantry.unresolved().count(), 0);
        assert_eq!(pantry.refresh(&table), 0);
    }

    #[test]
    fn test_import_overrides_updates_pantry_items() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("חציל", &table);
        pantry.add("זעתר", &table);
        pantry.add("גזר", &table);

        let pairs = vec![
            ("חציל".to_string(), "eggplant".to_string()),
            ("זעתר".to_string(), " ".to_string()),
            ("קינמון".to_string(), "cinnamon".to_string()),
        ];
        assert_eq!(pantry.import_overrides(&pairs, &table).unwrap(), (2, 1));

        let eggplant = &pantry.items()[0];
        assert_eq!(eggplant.target_term, "eggplant");
        assert!(eggplant.resolved);
        assert_eq!(pantry.unresolved().map(|i| i.source_term.as_str()).collect::<Vec<_>>(), vec!["זעתר"]);
    }

    #[test]
    fn test_owned_terms_pick_up_later_overrides() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("בצל", &table);
        pantry.add("ביצה", &table);
        assert_eq!(
            pantry.owned_target_terms(&table),
            ["egg", "onion"].iter().map(|s| s.to_string()).collect()
        );

        table.add_override("בצל", "shallot").unwrap();
        assert!(pantry.owned_target_terms(&table).contains("shallot"));
    }

    #[test]
    fn test_remove() {
        let table = table();
        let mut pantry = Pantry::new();
        pantry.add("גזר", &table);
        assert_eq!(pantry.remove("גזר").map(|i| i.target_term), Some("carrot".to_string()));
        assert!(pantry.remove("גזר").is_none());
        assert!(pantry.is_empty());
    }
}
