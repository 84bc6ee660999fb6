use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::api_connection::{ApiConnectionError, RecipeInfo, RecipeProvider, RecipeSummary};
use crate::ingredient_matcher::{classify, ClassificationResult};
use crate::store::{CacheStore, RecipeCache};
use crate::term_normalizer::normalize;

pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
pub const DEFAULT_RANDOM_COUNT: u32 = 10;

/// Fingerprint of an ingredient set: normalized, blank-free, deduplicated,
/// sorted and comma-joined, e.g. `"egg,onion,tomato"`.
pub fn cache_key<T: AsRef<str>>(terms: &[T]) -> String {
    canonical_terms(terms).into_iter().collect::<Vec<_>>().join(",")
}

fn canonical_terms<T: AsRef<str>>(terms: &[T]) -> BTreeSet<String> {
    terms
        .iter()
        .map(|term| normalize(term.as_ref()))
        .filter(|term| !term.is_empty())
        .collect()
}

/// Recipe lookups with ingredient searches answered from the cache when possible.
pub struct RecipeService<P: RecipeProvider, C: CacheStore> {
    provider: P,
    cache: RecipeCache<C>,
    search_limit: u32,
}

impl<P: RecipeProvider, C: CacheStore> RecipeService<P, C> {
    pub fn new(provider: P, cache: RecipeCache<C>) -> Self {
        Self {
            provider,
            cache,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &RecipeCache<C> {
        &self.cache
    }

    /// Recipes using the given target-vocabulary terms.
    ///
    /// A cached result is returned without contacting the provider. On a miss
    /// the provider result is cached before it is returned; a cache failure is
    /// logged and does not fail the search.
    pub async fn find_recipes<T: AsRef<str>>(&self, terms: &[T]) -> Result<Vec<RecipeSummary>, ApiConnectionError> {
        let canonical: Vec<String> = canonical_terms(terms).into_iter().collect();
        if canonical.is_empty() {
            info!("no ingredients to search with");
            return Ok(Vec::new());
        }
        let key = canonical.join(",");

        match self.cache.get(&key) {
            Ok(Some(recipes)) => return Ok(recipes),
            Ok(None) => {}
            Err(e) => warn!(%key, error = %e, "recipe cache unreadable, treating as miss"),
        }

        info!(%key, "searching recipe provider");
        let recipes = self.provider.find_by_ingredients(&canonical, self.search_limit).await?;
        info!(%key, count = recipes.len(), "recipe search finished");

        if let Err(e) = self.cache.put(&key, recipes.clone()) {
            warn!(%key, error = %e, "could not cache recipe search result");
        }
        Ok(recipes)
    }

    pub async fn recipe_details(&self, id: i64) -> Result<RecipeInfo, ApiConnectionError> {
        self.provider.recipe_information(id).await
    }

    /// Random recipes sorted by title.
    pub async fn random_recipes(&self, number: u32) -> Result<Vec<RecipeInfo>, ApiConnectionError> {
        let mut recipes = self.provider.random_recipes(number).await?;
        recipes.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(recipes)
    }

    /// Fetches a recipe and splits its ingredients against the owned terms.
    pub async fn check_recipe(
        &self,
        id: i64,
        owned_target_terms: &BTreeSet<String>,
    ) -> Result<(RecipeInfo, ClassificationResult), ApiConnectionError> {
        let info = self.recipe_details(id).await?;
        let classification = classify(owned_target_terms, &info.extended_ingredients);
        Ok((info, classification))
    }
}
