use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{JsonFile, StoreError};

const SOURCE_COL: &str = "source";
const TARGET_COL: &str = "target";

/// Key-unique table of user translation overrides.
///
/// Keys arrive already normalized; the store does no normalization of its own.
pub trait OverrideStore: Send + Sync {
    fn get(&self, source: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the override for `source`.
    fn put(&self, source: &str, target: &str) -> Result<(), StoreError>;

    fn all(&self) -> Result<BTreeMap<String, String>, StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn get(&self, source: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("overrides"))?;
        Ok(entries.get(source).cloned())
    }

    fn put(&self, source: &str, target: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("overrides"))?;
        entries.insert(source.to_string(), target.to_string());
        Ok(())
    }

    fn all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("overrides"))?;
        Ok(entries.clone())
    }
}

/// Overrides persisted as one JSON object in a data file.
///
/// A write only reaches memory after the file has been replaced, so a failed
/// save leaves both the file and the in-memory table as they were.
#[derive(Debug)]
pub struct FileOverrideStore {
    file: JsonFile<BTreeMap<String, String>>,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileOverrideStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file = JsonFile::new(path);
        let entries = file.load()?;
        Ok(Self {
            file,
            entries: RwLock::new(entries),
        })
    }
}

impl OverrideStore for FileOverrideStore {
    fn get(&self, source: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("overrides"))?;
        Ok(entries.get(source).cloned())
    }

    fn put(&self, source: &str, target: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned("overrides"))?;
        let mut next = entries.clone();
        next.insert(source.to_string(), target.to_string());
        self.file.save(&next)?;
        *entries = next;
        Ok(())
    }

    fn all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned("overrides"))?;
        Ok(entries.clone())
    }
}

/// Reads `source,target` pairs from a CSV file with a header row.
///
/// Rows with an empty source or target are skipped; surrounding whitespace is trimmed.
pub fn load_overrides_csv(csv_path: &Path) -> Result<Vec<(String, String)>, StoreError> {
    let file = File::open(csv_path).map_err(|source| StoreError::Io {
        path: csv_path.to_path_buf(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(file);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
    };
    let source_idx = column(SOURCE_COL)?;
    let target_idx = column(TARGET_COL)?;

    let mut pairs = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let source = record.get(source_idx).unwrap_or("").trim();
        let target = record.get(target_idx).unwrap_or("").trim();
        if source.is_empty() || target.is_empty() {
            continue;
        }
        pairs.push((source.to_string(), target.to_string()));
    }
    Ok(pairs)
}
