//! Plays a scenario in the terminal with autoplay, printing each message as it
//! is finalized. Useful for checking a custom catalog without the dashboard.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use demo_deck::ScenarioCatalog;
use demo_deck::config::DEMO;
use demo_deck::engine::{DemoEngine, Message};
use demo_deck::utils::now;

/// Frame cadence of the headless loop
const TICK: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a demo scenario in the terminal")]
struct Args {
    /// Scenario id to play
    scenario: Option<String>,

    /// List the available scenarios and exit
    #[arg(long, default_value_t = false)]
    list: bool,

    /// JSON file with a custom scenario catalog
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Seed for canned replies and feeds
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between steps, in milliseconds
    #[arg(long, default_value_t = DEMO.playback.default_autoplay_pause_ms)]
    pause_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let catalog = match &args.scenarios {
        Some(path) => ScenarioCatalog::load_from_path(path)
            .with_context(|| format!("Failed to load scenarios from {:?}", path))?,
        None => ScenarioCatalog::builtin(),
    };

    if args.list {
        for scenario in catalog.scenarios() {
            println!(
                "{:<20} {} ({} steps)",
                scenario.id,
                scenario.title,
                scenario.len()
            );
        }
        return Ok(());
    }

    let Some(scenario_id) = args.scenario.clone() else {
        bail!("No scenario given. Use --list to see the available ones.");
    };
    if !catalog.contains(&scenario_id) {
        bail!("Unknown scenario '{}'", scenario_id);
    }

    play(Arc::new(catalog), &scenario_id, &args).await
}

async fn play(catalog: Arc<ScenarioCatalog>, scenario_id: &str, args: &Args) -> Result<()> {
    let mut engine = DemoEngine::new(catalog, args.seed, now());
    engine.set_autoplay(Some(Duration::from_millis(args.pause_ms)));

    let outcome = engine.start_scenario(scenario_id);
    if !outcome.is_applied() {
        bail!("Could not start '{}': {}", scenario_id, outcome);
    }
    if let Some(scenario) = engine.current_scenario() {
        println!("▶ {}: {}\n", scenario.title, scenario.description);
    }

    // The greeting is already in the log; print it too
    let mut printed = 0;
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\n⏹ Interrupted");
                break;
            }
            _ = ticker.tick() => {
                engine.update(now());
                for message in engine.message_log().since(printed) {
                    print_message(message);
                }
                printed = engine.message_log().len();

                if engine.is_finished() {
                    println!("✅ Scenario complete ({} steps)", engine.state().completed_steps.len());
                    break;
                }
            }
        }
    }

    engine.dispose();
    Ok(())
}

fn print_message(message: &Message) {
    println!("[{}] {}: {}", message.timestamp, message.actor, message.content);
    for file in &message.files {
        println!("        {} {} ({})", file.icon, file.name, file.preview);
    }
    if let Some(metadata) = &message.metadata {
        for (label, value) in &metadata.metrics {
            println!("        {}: {}", label, value);
        }
        for alert in &metadata.alerts {
            println!("        ⚠ {} [{}]", alert.message, alert.severity);
        }
    }
    println!();
}
