//! Rcenter API - wire and model definitions shared by every crate that
//! speaks the streaming protocol.
//!
//! This crate provides:
//! - Common API constants and pagination/validation helpers
//! - The `Payload`/`Metadata` gRPC envelope (generated from proto)
//! - Request/response envelope traits used by the registry and config cores

pub mod grpc;
pub mod model;
pub mod remote;
pub mod validation;

// Re-export commonly used types
pub use model::*;
