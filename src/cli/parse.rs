//! CLI parse: clap types for Flavour Fusion. No behavior; definitions only.

use crate::export::ExportFormat;
use crate::prompt::{DietaryPreference, FlavorProfile};
use crate::session::DocumentKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Flavour Fusion CLI - AI recipe generation and shopping-list export
#[derive(Parser)]
#[command(name = "flavour")]
#[command(about = "AI-driven recipe generation, food pairing and shopping-list export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (holds config/ and the session store)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (replaces user and workspace config files)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a recipe from a topic and/or ingredients, with food pairings
    Recipe(RecipeArgs),
    /// Suggest dishes, drinks and desserts that go with a recipe
    Pairing {
        /// Recipe name or topic
        name: String,
    },
    /// Ask the AI chef about the current recipe
    Ask {
        /// Question (prompted for when omitted)
        question: Option<String>,
        /// Answer language (defaults to kitchen.language)
        #[arg(long)]
        language: Option<String>,
    },
    /// Ask the cooking assistant a general question
    Assistant {
        /// Question (prompted for when omitted)
        question: Option<String>,
    },
    /// Extract a shopping list from the current recipe
    ShoppingList,
    /// Rewrite the current recipe for a number of servings
    Scale {
        /// Number of people (1-100)
        servings: u32,
    },
    /// Translate the UI labels and cache them in the session
    TranslateUi {
        /// Target language
        language: String,
        /// Drop the cached translation instead
        #[arg(long)]
        reset: bool,
    },
    /// Suggest a traditional dish for a set of ingredients
    SuggestDish {
        /// Comma-separated ingredients
        ingredients: String,
    },
    /// Tell a joke
    Joke,
    /// Export the shopping list as a PDF or image
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,
        /// Output directory (defaults to export.output_dir)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Export this text file instead of the session's shopping list
        #[arg(long)]
        input: Option<PathBuf>,
        /// Show the layout without writing a file
        #[arg(long)]
        preview: bool,
    },
    /// Show documents kept in the session
    Show {
        /// Which document (all when omitted)
        #[arg(value_enum)]
        document: Option<ShowTarget>,
    },
    /// Show provider, configuration and session status
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecipeArgs {
    /// Recipe topic, e.g. "vegan lasagna"
    #[arg(long)]
    pub topic: Option<String>,

    /// Comma-separated ingredients to use exclusively
    #[arg(long)]
    pub ingredients: Option<String>,

    /// Approximate recipe length in words (100-2000)
    #[arg(long)]
    pub word_count: Option<u32>,

    /// Dietary preference
    #[arg(long, value_enum)]
    pub diet: Option<DietaryPreference>,

    /// Maximum total cooking time in minutes (5-120)
    #[arg(long)]
    pub max_minutes: Option<u32>,

    /// Flavor profile
    #[arg(long, value_enum)]
    pub flavor: Option<FlavorProfile>,

    /// Recipe language (defaults to kitchen.language)
    #[arg(long)]
    pub language: Option<String>,

    /// Cuisine style, e.g. "Thai"
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Number of people to serve (1-100)
    #[arg(long)]
    pub servings: Option<u32>,

    /// Traditional dish to write the recipe for (see suggest-dish)
    #[arg(long)]
    pub dish: Option<String>,

    /// Skip the nutritional breakdown
    #[arg(long)]
    pub no_nutrition: bool,
}

/// Session documents addressable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowTarget {
    Recipe,
    Pairing,
    ShoppingList,
}

impl ShowTarget {
    pub fn kind(&self) -> DocumentKind {
        match self {
            ShowTarget::Recipe => DocumentKind::Recipe,
            ShowTarget::Pairing => DocumentKind::FoodPairing,
            ShowTarget::ShoppingList => DocumentKind::ShoppingList,
        }
    }
}
