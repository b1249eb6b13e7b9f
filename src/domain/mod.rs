// Domain types and static data
pub mod library;
pub mod mock_files;
pub mod scenario;
pub mod widget;

// Re-export commonly used types
pub use library::ScenarioCatalog;
pub use mock_files::{FileAction, FileCategory, MockFile};
pub use scenario::{ActorKind, Emphasis, FileRef, Scenario, Step, StepMetadata, TypingSpeed};
pub use widget::{DashboardVariant, FlipDirection, WidgetId};
