//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Session text, preview deck and history
//! - `ModalStack` - Modal overlay management
//! - `CodeViewMode`, `FocusedPanel` - Presentation toggles

pub mod deck;
pub mod domain;
pub mod history;
pub mod modal;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use deck::{MountedPreview, PreviewDeck, PreviewOutcome};
pub use domain::DomainState;
pub use history::{GenerationEntry, GenerationHistory};
pub use session::{GenerationStatus, Session};
pub use ui::{CodeViewMode, FocusedPanel};
