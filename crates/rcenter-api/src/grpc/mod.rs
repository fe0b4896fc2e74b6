//! Generated from `proto/rcenter_grpc_service.proto` by `build.rs`.
//!
//! `Payload`/`Metadata` are the only hand-defined wire messages; every
//! concrete request/response shape travels as JSON inside `Payload.body`
//! (see `rcenter_api::remote::model::RequestTrait`/`ResponseTrait`).

#![allow(clippy::all)]

include!("rcenter.grpc.rs");
