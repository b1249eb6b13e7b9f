#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[allow(unused_imports)]
use demo_deck::{
    Cli,           // The struct from lib.rs
    LaunchOptions, // Resolved start-up options
    run_app,       // The function from lib.rs
};

// --- 2. WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast; // <--- REQUIRED for .dyn_into()
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This keeps the WASM memory allocator from being stripped
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn _keep_alive() {}

// Even though we use 'start', the compiler still wants a main() function
// because this file is compiled as a binary.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    use demo_deck::config::WASM_CANVAS_ID;

    // A. Init Logging
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Demo Deck starting in WASM mode...");

    // B. Setup for Web
    let web_options = eframe::WebOptions::default();

    // 1. Get the browser window and document
    let window = web_sys::window().ok_or("no global `window` exists")?;
    let document = window.document().ok_or("should have a document on window")?;

    // C. The layout variant comes from the page path
    let path = window.location().pathname()?;
    let options = LaunchOptions::from_path(&path);
    log::info!("Path {} selects the {:?} layout", path, options.variant);

    // 2. Find the canvas element by ID
    let canvas = document
        .get_element_by_id(WASM_CANVAS_ID)
        .ok_or("Failed to find the canvas element")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the canvas element was not a valid HtmlCanvasElement")?;

    // 3. Pass the canvas OBJECT to start()
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| Ok(run_app(cc, options))),
        )
        .await
}

// --- 3. NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use clap::Parser;
    use demo_deck::config::{APP_STATE_PATH, APP_TITLE};
    use eframe::NativeOptions;
    use std::path::PathBuf;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Resolve the catalog and start-up options
    let launch = match LaunchOptions::from_cli(&args) {
        Ok(launch) => launch,
        Err(e) => {
            log::error!("{:#}", e);
            return Err(eframe::Error::AppCreation(e.into()));
        }
    };

    // D. Run Native App
    let options = NativeOptions {
        persistence_path: Some(PathBuf::from(APP_STATE_PATH)),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(run_app(cc, launch))),
    )
}
