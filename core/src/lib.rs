//! A generic, typed HTTP request helper.
//!
//! # Overview
//! One request routine, `TypedClient::request`, serves every endpoint. Each
//! call site names a `Descriptor` that fixes the body it may send and the
//! type the response is decoded into, so a mismatched body is a compile
//! error rather than a runtime surprise.
//!
//! # Design
//! - The network is an injected `Transport`; `UreqTransport` is provided.
//! - `build` / `parse` expose the wire form without I/O; `request` chains
//!   them around one transport call.
//! - Responses are trusted to match the declared type. Non-JSON text fails
//!   as `ApiError::Decoding`, JSON of the wrong shape as `ApiError::Shape`.
//! - Non-2xx statuses are decoded like any other response unless
//!   `StatusPolicy::RequireSuccess` is configured.

pub mod client;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod http;
pub mod transport;
pub mod users;

pub use client::TypedClient;
pub use config::{ClientConfig, StatusPolicy, BASE_URL};
pub use descriptor::{Descriptor, Json, RequestBody};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
