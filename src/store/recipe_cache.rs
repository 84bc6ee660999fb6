use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info};

use super::{JsonFile, StoreError};
use crate::api_connection::RecipeSummary;

type Entries = BTreeMap<String, Vec<RecipeSummary>>;

/// Backing storage for [`RecipeCache`].
///
/// `replace` must swap the whole entry for a key in one step: a reader sees
/// either the old list or the new one, never a mix or an empty gap.
pub trait CacheStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<Vec<RecipeSummary>>, StoreError>;

    fn replace(&self, key: &str, recipes: Vec<RecipeSummary>) -> Result<(), StoreError>;

    /// Returns whether an entry was present.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<Entries>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Result<Option<Vec<RecipeSummary>>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        Ok(entries.get(key).cloned())
    }

    fn replace(&self, key: &str, recipes: Vec<RecipeSummary>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        entries.insert(key.to_string(), recipes);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        Ok(entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        entries.clear();
        Ok(())
    }
}

/// Cache persisted as one JSON document; writers commit the file before memory.
#[derive(Debug)]
pub struct FileCacheStore {
    file: JsonFile<Entries>,
    entries: RwLock<Entries>,
}

impl FileCacheStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = JsonFile::new(path);
        let entries = file.load()?;
        Ok(Self {
            file,
            entries: RwLock::new(entries),
        })
    }

    fn commit(&self, change: impl FnOnce(&mut Entries) -> bool) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        let mut next = entries.clone();
        let changed = change(&mut next);
        if changed {
            self.file.save(&next)?;
            *entries = next;
        }
        Ok(changed)
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self, key: &str) -> Result<Option<Vec<RecipeSummary>>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("recipe cache"))?;
        Ok(entries.get(key).cloned())
    }

    fn replace(&self, key: &str, recipes: Vec<RecipeSummary>) -> Result<(), StoreError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), recipes);
            true
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.commit(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.commit(|entries| {
            let had_entries = !entries.is_empty();
            entries.clear();
            had_entries
        })?;
        Ok(())
    }
}

/// Recipe search results keyed by ingredient-set fingerprint.
///
/// Entries never expire; they are replaced by a later `put` for the same key
/// or dropped through `invalidate` / `clear`.
pub struct RecipeCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> RecipeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// `None` means never cached, which is different from a cached empty list.
    pub fn get(&self, key: &str) -> Result<Option<Vec<RecipeSummary>>, StoreError> {
        let hit = self.store.load(key)?;
        match &hit {
            Some(recipes) => info!(key, count = recipes.len(), "recipe cache hit"),
            None => debug!(key, "recipe cache miss"),
        }
        Ok(hit)
    }

    /// Drops whatever was stored under `key` and stores `recipes` in its place.
    pub fn put(&self, key: &str, recipes: Vec<RecipeSummary>) -> Result<(), StoreError> {
        let count = recipes.len();
        self.store.replace(key, recipes)?;
        debug!(key, count, "recipe cache updated");
        Ok(())
    }

    pub fn invalidate(&self, key: &str) -> Result<bool, StoreError> {
        self.store.remove(key)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()
    }
}
