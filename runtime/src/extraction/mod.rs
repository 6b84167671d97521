//! Comment extraction from rendered pages.
//!
//! Waits for the comments section, scrolls until it stops growing,
//! snapshots the DOM, and normalizes every thread not already recorded
//! in the caller's session.

pub mod dom;
pub mod error;
pub mod loader;
pub mod normalizer;
pub mod orchestrator;
pub mod session;
pub mod types;

pub use error::ExtractError;
pub use orchestrator::{Extractor, ExtractorConfig};
pub use session::ExtractionSession;
pub use types::{CommentRecord, ExtractionEvent};
