pub mod api_connection;
pub mod cli;
pub mod config;
pub mod ingredient_matcher;
pub mod missing_aggregator;
pub mod pantry;
pub mod recipe_service;
pub mod shopping_list;
pub mod store;
pub mod term_normalizer;
pub mod translation;
