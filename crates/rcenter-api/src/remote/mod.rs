//! Envelope and handshake models for the streaming session layer.

pub mod model;

pub use model::*;
