#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries)
pub use analysis::AnalysisPipeline;
pub use app::App;
pub use config::{GEMINI, PERSISTENCE};
pub use data::{GeminiClient, PersistentStore};
pub use domain::Language;
pub use engine::VisionEngine;
pub use error::VisionError;

// CLI argument parsing
use {clap::Parser, std::path::PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the subscription, history and burned codes
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Interface and analysis language (defaults to the saved choice, then the system locale)
    #[arg(long, value_enum)]
    pub lang: Option<Language>,

    /// Chart screenshot to open on startup
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Vision model to call
    #[arg(long, default_value = GEMINI.endpoint.model)]
    pub model: String,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            data_dir: None,
            lang: None,
            image: None,
            // Browser builds bake the key in at compile time
            api_key: option_env!("GEMINI_API_KEY").map(String::from),
            model: GEMINI.endpoint.model.to_string(),
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
