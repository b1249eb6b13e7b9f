#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

// Re-export commonly used types
pub use domain::{DashboardVariant, Scenario, ScenarioCatalog, Step, WidgetId};
pub use engine::{DemoEngine, DemoOrchestrator, DemoState, NavKey, Transition};
pub use ui::DemoDeckApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dashboard layout to open with (overrides the stored preference)
    #[arg(long, value_enum)]
    pub variant: Option<DashboardVariant>,

    /// Scenario id to start playing immediately
    #[arg(long)]
    pub scenario: Option<String>,

    /// JSON file with a custom scenario catalog (replaces the built-in library)
    #[arg(long)]
    pub scenarios: Option<PathBuf>,

    /// Seed for the simulated feeds and canned replies
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable autoplay with this pause between steps, in milliseconds
    #[arg(long)]
    pub autoplay_ms: Option<u64>,
}

/// Everything the app needs at start-up, resolved from the command line (native)
/// or the page URL (WASM).
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub catalog: Arc<ScenarioCatalog>,
    pub variant: Option<DashboardVariant>,
    pub autostart: Option<String>,
    pub seed: Option<u64>,
    pub autoplay: Option<Duration>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            catalog: Arc::new(ScenarioCatalog::builtin()),
            variant: None,
            autostart: None,
            seed: None,
            autoplay: None,
        }
    }
}

impl LaunchOptions {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let catalog = match &cli.scenarios {
            Some(path) => ScenarioCatalog::load_from_path(path)
                .with_context(|| format!("Failed to load scenarios from {:?}", path))?,
            None => ScenarioCatalog::builtin(),
        };

        if let Some(id) = &cli.scenario {
            if !catalog.contains(id) {
                bail!(
                    "Unknown scenario '{}'. Available: {}",
                    id,
                    catalog.ids().collect::<Vec<_>>().join(", ")
                );
            }
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            variant: cli.variant,
            autostart: cli.scenario.clone(),
            seed: cli.seed,
            autoplay: cli.autoplay_ms.map(Duration::from_millis),
        })
    }

    /// Browser entry: the layout comes from the page path, e.g. "/minimalist".
    pub fn from_path(path: &str) -> Self {
        Self {
            variant: Some(DashboardVariant::from_path(path)),
            ..Self::default()
        }
    }
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, options: LaunchOptions) -> Box<dyn eframe::App> {
    let app = ui::DemoDeckApp::new(cc, options);
    Box::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_every_option() {
        let cli = Cli::parse_from([
            "demo-deck",
            "--variant",
            "compact",
            "--scenario",
            "crisis-prevention",
            "--seed",
            "42",
            "--autoplay-ms",
            "1500",
        ]);
        let options = LaunchOptions::from_cli(&cli).unwrap();

        assert_eq!(options.variant, Some(DashboardVariant::Compact));
        assert_eq!(options.autostart.as_deref(), Some("crisis-prevention"));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.autoplay, Some(Duration::from_millis(1_500)));
        assert_eq!(options.catalog.len(), 4);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        let cli = Cli {
            scenario: Some("does-not-exist".into()),
            ..Cli::default()
        };
        let err = LaunchOptions::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("onboarding-care"));
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let cli = Cli {
            scenarios: Some(PathBuf::from("/nonexistent/scenarios.json")),
            ..Cli::default()
        };
        let err = LaunchOptions::from_cli(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("scenarios.json"));
    }

    #[test]
    fn path_selects_variant() {
        assert_eq!(
            LaunchOptions::from_path("/minimalist2/").variant,
            Some(DashboardVariant::Compact)
        );
        assert_eq!(
            LaunchOptions::from_path("/anything").variant,
            Some(DashboardVariant::Classic)
        );
    }
}
