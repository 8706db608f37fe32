//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::state::{ExportFormat, FeaturedFilter};

/// Export formats accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportArg {
    /// Pretty-printed JSON array.
    Json,
    /// Flattened CSV table.
    Csv,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Json => Self::Json,
            ExportArg::Csv => Self::Csv,
        }
    }
}

/// Featured selector accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeaturedArg {
    /// Featured and non-featured games.
    All,
    /// Featured games only.
    Featured,
    /// Non-featured games only.
    NotFeatured,
}

impl From<FeaturedArg> for FeaturedFilter {
    fn from(arg: FeaturedArg) -> Self {
        match arg {
            FeaturedArg::All => Self::All,
            FeaturedArg::Featured => Self::Featured,
            FeaturedArg::NotFeatured => Self::NotFeatured,
        }
    }
}

/// Game Hub - browse, filter, sort and export the game catalog
#[derive(Parser, Debug)]
#[command(name = "gamehub")]
#[command(version)]
#[command(about = "Browse, filter, sort and export the game catalog", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Catalog JSON file (default: settings `catalog_path`, then the bundled sample)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Switch to this language before printing (en, zh, es, fr)
    #[arg(long)]
    pub lang: Option<String>,

    /// Only games in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only games with any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Lowest rating to include (0-5)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Highest rating to include (0-5)
    #[arg(long)]
    pub max_rating: Option<f64>,

    /// Only games with this difficulty
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Only games with exactly this minimum age (0 = any)
    #[arg(long)]
    pub min_age: Option<u32>,

    /// Featured selector
    #[arg(long, value_enum)]
    pub featured: Option<FeaturedArg>,

    /// Case-insensitive text search in titles, descriptions and tags
    #[arg(short, long)]
    pub query: Option<String>,

    /// Sort field (popularityScore, rating, playCount, title, category, addedDate)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long)]
    pub order: Option<String>,

    /// Export the filtered view in this format instead of listing it
    #[arg(long, value_enum)]
    pub export: Option<ExportArg>,

    /// Directory for export files (default: settings `export_dir`, then the current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print "N of M" counts only
    #[arg(long)]
    pub stats: bool,

    /// Print the available filter choices as JSON
    #[arg(long)]
    pub options: bool,

    /// Print the translation of a key in the active language and exit
    #[arg(long, value_name = "KEY")]
    pub text: Option<String>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}
