pub mod core;
pub mod messages;
pub mod orchestration;
pub mod rotation;
pub mod timer;
pub mod typing;

// Re-export key components
pub use core::{CANNED_REPLIES, DemoEngine, EngineError};
pub use messages::{Message, MessageLog};
pub use orchestration::{DemoOrchestrator, DemoState, NavKey, Transition, TypingLock};
pub use rotation::{RotationEvent, RotationSet, ScrollOutcome};
pub use typing::{TypingError, TypingRequest, TypingSimulator};
