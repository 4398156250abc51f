//! giftclip playback core (engine-agnostic)
//!
//! Sequences one media session: resolve the identifier into a CDN URL, wait
//! for the host media backend to report ready, optionally wait for the reveal
//! gate, play, and surface completion. The controller never talks to a real
//! player; it emits [`MediaCommand`]s and consumes callbacks tagged with the
//! [`SessionId`] they belong to.

pub mod analytics;
pub mod config;
pub mod error;
pub mod ids;
pub mod media;
pub mod outputs;
pub mod session;
pub mod stage;

// Re-exports for consumers (orchestrator, wasm)
pub use analytics::{AnalyticsEvent, AnalyticsKind, Primitive};
pub use config::MediaConfig;
pub use error::{MediaLoadError, StageError};
pub use ids::{IdAllocator, SessionId};
pub use media::{apply_commands, effective_identifier, resolve_media, MediaBackend, MediaCommand};
pub use outputs::{Outputs, StageEvent};
pub use session::{MediaSession, SessionStatus, Stage};
pub use stage::StageController;
