//! Configuration module for the demo dashboard.

mod debug; // Private: use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod persistence;

// Re-export commonly used items
pub use demo::{DEMO, DemoConfig, FeedSettings, PlaybackSettings, RotationSettings, TypingSettings};
pub use persistence::{APP_STATE_PATH, APP_TITLE, WASM_CANVAS_ID};
