use async_trait::async_trait;
use dotenv::dotenv;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::env;
use thiserror::Error;
use tracing::{debug, warn};

use super::endpoints::{
    Provider, RandomRecipeResponse, RecipeInfo, RecipeSummary, DEFAULT_API_KEY_ENV_VAR,
    SPOONACULAR_BASE_URL,
};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl ApiConnectionError {
    /// True when the request never left because a credential is missing.
    pub fn is_configuration_missing(&self) -> bool {
        matches!(self, ApiConnectionError::MissingApiKey(_))
    }
}

/// The three recipe lookups the application needs from an external provider.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>, ApiConnectionError>;

    async fn recipe_information(&self, id: i64) -> Result<RecipeInfo, ApiConnectionError>;

    async fn random_recipes(&self, number: u32) -> Result<Vec<RecipeInfo>, ApiConnectionError>;
}

impl Provider {
    pub fn spoonacular(api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self::Spoonacular {
            api_key: api_key_env_var_name.to_string(),
            base_url: SPOONACULAR_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(self, url: &str) -> Self {
        match self {
            Provider::Spoonacular { api_key, .. } => Provider::Spoonacular {
                api_key,
                base_url: url.trim_end_matches('/').to_string(),
            },
        }
    }

    fn api_key(&self) -> Result<String, ApiConnectionError> {
        match self {
            Provider::Spoonacular {
                api_key: api_key_env_var_name,
                ..
            } => {
                dotenv().ok();
                env::var(api_key_env_var_name)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))
            }
        }
    }

    fn base_url(&self) -> &str {
        match self {
            Provider::Spoonacular { base_url, .. } => base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiConnectionError> {
        let actual_api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url(), path);
        debug!(%url, "requesting recipe provider");

        let response = Client::new()
            .get(&url)
            .query(query)
            .query(&[("apiKey", actual_api_key)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str::<T>(&body)?)
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(%status, %url, "recipe provider returned an error");
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self::spoonacular(DEFAULT_API_KEY_ENV_VAR)
    }
}

/// Ingredient list as the provider's query parameter: lowercased and comma-joined.
/// Spaces are left in; form encoding sends them as `+`.
pub fn ingredients_query(ingredients: &[String]) -> String {
    ingredients
        .iter()
        .map(|term| term.to_lowercase())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl RecipeProvider for Provider {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        number: u32,
    ) -> Result<Vec<RecipeSummary>, ApiConnectionError> {
        self.get_json(
            "/recipes/findByIngredients",
            &[
                ("ingredients", ingredients_query(ingredients)),
                ("number", number.to_string()),
                ("ranking", "1".to_string()),
            ],
        )
        .await
    }

    async fn recipe_information(&self, id: i64) -> Result<RecipeInfo, ApiConnectionError> {
        self.get_json(
            &format!("/recipes/{}/information", id),
            &[("includeNutrition", "false".to_string())],
        )
        .await
    }

    async fn random_recipes(&self, number: u32) -> Result<Vec<RecipeInfo>, ApiConnectionError> {
        let response: RandomRecipeResponse = self
            .get_json("/recipes/random", &[("number", number.to_string())])
            .await?;
        Ok(response.recipes)
    }
}
