use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Track your pantry and find recipes you can cook", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage pantry items
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },
    /// Show how a term translates
    Resolve { term: String },
    /// Manage manual translations
    Overrides {
        #[command(subcommand)]
        action: OverridesAction,
    },
    /// Search recipes using everything in the pantry
    Search,
    /// Show a recipe and which of its ingredients you already have
    Recipe {
        id: i64,
        /// Put every missing ingredient on the shopping list
        #[arg(long)]
        add_missing: bool,
    },
    /// Show random recipes
    Random {
        #[arg(short, long)]
        number: Option<u32>,
    },
    /// Manage the shopping list
    Shopping {
        #[command(subcommand)]
        action: ShoppingAction,
    },
    /// Manage cached recipe searches
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PantryAction {
    Add { term: String },
    Remove { term: String },
    List,
    /// Set the translation for a pantry term by hand
    Translate { term: String, target: String },
}

#[derive(Subcommand, Debug)]
pub enum OverridesAction {
    List,
    /// Import `source,target` rows from a CSV file with a header
    Import { csv_file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ShoppingAction {
    List,
    /// Mark an item bought (or not bought); bought items go into the pantry
    Toggle { name: String },
    Remove { name: String },
    ClearBought,
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    Clear,
    /// Forget the cached search for the current pantry
    Invalidate,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
