//! Local persistence: JSON data files, translation overrides and the recipe cache.

pub mod json_file;
pub mod overrides;
pub mod recipe_cache;

use std::path::PathBuf;
use thiserror::Error;

pub use json_file::JsonFile;
pub use overrides::{FileOverrideStore, MemoryOverrideStore, OverrideStore};
pub use recipe_cache::{CacheStore, FileCacheStore, MemoryCacheStore, RecipeCache};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column '{0}'")]
    MissingColumn(String),
    #[error("Store lock poisoned: {0}")]
    Poisoned(&'static str),
}
