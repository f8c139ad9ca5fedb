//! Recipe recommender CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (recommend, rank, suggest)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{handle_rank, handle_recommend, handle_suggest, init_logging, load_settings};
