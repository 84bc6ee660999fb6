pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, RecipeProvider};
pub use endpoints::{Ingredient, Provider, RecipeInfo, RecipeSummary};
