//! Application configuration from environment variables (and `.env`).

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::api_connection::endpoints::{DEFAULT_API_KEY_ENV_VAR, SPOONACULAR_BASE_URL};
use crate::recipe_service::{DEFAULT_RANDOM_COUNT, DEFAULT_SEARCH_LIMIT};

const PANTRY_FILE: &str = "pantry.json";
const SHOPPING_LIST_FILE: &str = "shopping_list.json";
const OVERRIDES_FILE: &str = "translation_overrides.json";
const RECIPE_CACHE_FILE: &str = "recipe_cache.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Name of the variable that holds the Spoonacular key. The key itself is
    /// read only when a request is made.
    pub api_key_env_var: String,
    pub base_url: String,
    pub data_dir: PathBuf,
    pub search_limit: u32,
    pub random_count: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Ok(Self {
            api_key_env_var: env::var("SPOONACULAR_API_KEY_VAR")
                .unwrap_or_else(|_| DEFAULT_API_KEY_ENV_VAR.to_string()),
            base_url: env::var("SPOONACULAR_BASE_URL").unwrap_or_else(|_| SPOONACULAR_BASE_URL.to_string()),
            data_dir: env::var("PANTRY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./pantry-data")),
            search_limit: env::var("RECIPE_SEARCH_LIMIT")
                .unwrap_or_else(|_| DEFAULT_SEARCH_LIMIT.to_string())
                .parse()
                .context("Invalid RECIPE_SEARCH_LIMIT")?,
            random_count: env::var("RANDOM_RECIPE_COUNT")
                .unwrap_or_else(|_| DEFAULT_RANDOM_COUNT.to_string())
                .parse()
                .context("Invalid RANDOM_RECIPE_COUNT")?,
        })
    }

    pub fn pantry_path(&self) -> PathBuf {
        self.data_file(PANTRY_FILE)
    }

    pub fn shopping_list_path(&self) -> PathBuf {
        self.data_file(SHOPPING_LIST_FILE)
    }

    pub fn overrides_path(&self) -> PathBuf {
        self.data_file(OVERRIDES_FILE)
    }

    pub fn recipe_cache_path(&self) -> PathBuf {
        self.data_file(RECIPE_CACHE_FILE)
    }

    fn data_file(&self, name: &str) -> PathBuf {
        Path::new(&self.data_dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-mutating tests must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SPOONACULAR_API_KEY_VAR",
        "SPOONACULAR_BASE_URL",
        "PANTRY_DATA_DIR",
        "RECIPE_SEARCH_LIMIT",
        "RANDOM_RECIPE_COUNT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.api_key_env_var, "SPOONACULAR_API_KEY");
        assert_eq!(config.base_url, "https://api.spoonacular.com");
        assert_eq!(config.search_limit, 10);
        assert_eq!(config.random_count, 10);
        assert_eq!(config.pantry_path(), PathBuf::from("./pantry-data").join("pantry.json"));
    }

    #[test]
    fn test_overrides_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("PANTRY_DATA_DIR", "/tmp/fridge");
        env::set_var("RECIPE_SEARCH_LIMIT", "25");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.search_limit, 25);
        assert_eq!(config.recipe_cache_path(), PathBuf::from("/tmp/fridge/recipe_cache.json"));
        clear_env();
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("RANDOM_RECIPE_COUNT", "many");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("Invalid RANDOM_RECIPE_COUNT"));
        clear_env();
    }
}
