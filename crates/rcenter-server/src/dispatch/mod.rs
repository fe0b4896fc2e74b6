//! Streaming Session Layer (C8) and Request Pipeline (C9): the wire shapes
//! for every operation (`model`), per-connection session state (`session`),
//! and the IP Policy -> Authentication -> Access Log -> Handler pipeline
//! that routes by `Metadata.type` (`handler`).

pub mod handler;
pub mod model;
pub mod session;

pub use handler::{cleanup_session, run_pipeline};
pub use session::SessionState;
