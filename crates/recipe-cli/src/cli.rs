//! CLI argument parsing for the recipe recommender.
//!
//! Flags override every other configuration source.

use clap::{Parser, Subcommand};

/// Recipe Recommender
///
/// Ranks recipes by how well they fit the ingredients you have.
#[derive(Parser, Debug)]
#[command(name = "recipe-recommender")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/recipe-recommender/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend recipes for a set of ingredients
    Recommend {
        /// Ingredients you have
        #[arg(required = true)]
        ingredients: Vec<String>,

        /// Recipe catalog (JSON array of recipes); overrides recipes_path
        #[arg(short, long)]
        recipes: Option<String>,

        /// Maximum results; overrides max_results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter and sort a JSON array of scored results
    Rank {
        /// File holding the JSON array
        file: String,
    },

    /// Autocomplete an ingredient name
    Suggest {
        /// Name prefix
        prefix: String,

        /// Ingredient catalog (JSON array of strings); overrides ingredients_path
        #[arg(short, long)]
        ingredients: Option<String>,

        /// Maximum suggestions
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
}
