use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";

#[derive(Clone, Debug, Serialize)]
pub enum Provider {
    Spoonacular {
        /// Name of the environment variable holding the key, not the key itself.
        api_key: String,
        base_url: String,
    },
}

/// One hit from an ingredient search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
}

/// A recipe-side ingredient, in the provider's vocabulary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(id: i64, name: &str, amount: f64, unit: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            amount,
            unit: unit.to_string(),
        }
    }

    /// `"2 pcs Onion"`, trailing zeros dropped from the amount.
    pub fn description(&self) -> String {
        let amount = format_amount(self.amount);
        if self.unit.is_empty() {
            format!("{} {}", amount, self.name)
        } else {
            format!("{} {} {}", amount, self.unit, self.name)
        }
    }
}

fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInfo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    pub instructions: Option<String>,
    pub source_url: Option<String>,
    pub ready_in_minutes: Option<u32>,
}

impl RecipeInfo {
    /// Instructions with HTML tags and the common entities stripped.
    pub fn plain_instructions(&self) -> Option<String> {
        self.instructions.as_deref().map(strip_html)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RandomRecipeResponse {
    pub recipes: Vec<RecipeInfo>,
}

fn html_tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

pub fn strip_html(text: &str) -> String {
    html_tag_regex()
        .replace_all(text, "")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
