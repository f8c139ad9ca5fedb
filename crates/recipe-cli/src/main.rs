//! Recipe Recommender
//!
//! Ranks recipes by how well they fit the ingredients you have.
//!
//! # Usage
//!
//! ```bash
//! recipe-recommender recommend chicken garlic [--recipes PATH] [--limit N] [--json]
//! recipe-recommender rank results.json
//! recipe-recommender suggest chi [--ingredients PATH] [--limit N]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/recipe-recommender/config.toml)
//! 3. Environment variables (RECIPE_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use recipe_cli::{handle_rank, handle_recommend, handle_suggest, init_logging, load_settings, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings)?;

    let output = match cli.command {
        Commands::Recommend {
            ingredients,
            recipes,
            limit,
            json,
        } => handle_recommend(&settings, &ingredients, recipes.as_deref(), limit, json).await?,
        Commands::Rank { file } => handle_rank(&file)?,
        Commands::Suggest {
            prefix,
            ingredients,
            limit,
        } => handle_suggest(&settings, &prefix, ingredients.as_deref(), limit)?,
    };

    println!("{output}");

    Ok(())
}
