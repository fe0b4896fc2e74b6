//! Shared server infrastructure for Rcenter
//!
//! This crate provides common types and configuration used by
//! `rcenter-server`:
//! - `AppState` (central application state: the two domain cores, the
//!   connection registry, server lifecycle status)
//! - `Configuration` (CLI args, config file loading)
//! - Error mapping from `RcenterError`/`anyhow::Error` onto `tonic::Status`

pub mod error;
pub mod model;

pub use rcenter_common::{ActionTypes, ApiType, SignType, is_valid, local_ip};

pub use error::{anyhow_to_status, rcenter_error_to_status};
pub use model::{AppState, Configuration, ServerStatus, ServerStatusManager};
