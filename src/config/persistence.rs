//! UI state persistence configuration

/// Path for saving/loading dashboard preferences (variant, last scenario, autoplay)
pub const APP_STATE_PATH: &str = ".demo_deck_state.json";

/// Window title for the native build
pub const APP_TITLE: &str = "Demo Deck - Executive Intelligence";

/// Canvas element the WASM build mounts into
pub const WASM_CANVAS_ID: &str = "the_canvas_id";
