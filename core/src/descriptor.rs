//! Per-call binding of request body and response types.
//!
//! A `Descriptor` is a zero-sized marker naming the body the call accepts and
//! the value it produces. `TypedClient::request` is generic over it, so one
//! request routine serves every endpoint while each call site stays fully
//! typed.
//!
//! A descriptor whose `Body` is `()` accepts no payload. Handing it a
//! `Json` body does not compile:
//!
//! ```compile_fail
//! use typed_request::users::{GetUser, User};
//! use typed_request::{HttpMethod, Json, Transport, TypedClient};
//!
//! async fn sneak_body<T: Transport>(client: &TypedClient<T>) {
//!     let user = User { name: "Kumar".to_string() };
//!     let _ = client
//!         .request::<GetUser>(HttpMethod::Get, "/users/1", Json(user))
//!         .await;
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Binds `Body` and `Response` for one kind of request.
pub trait Descriptor {
    /// `()` when the request carries no payload, `Json<T>` otherwise.
    type Body: RequestBody + Send;
    /// The type the response payload is decoded into.
    type Response: DeserializeOwned + Send;
}

/// A value that may be sent as a request body.
pub trait RequestBody {
    /// Serialize to wire text, or `None` when there is nothing to send.
    fn encode(&self) -> Result<Option<String>, ApiError>;
}

impl RequestBody for () {
    fn encode(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }
}

/// JSON request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> RequestBody for Json<T> {
    fn encode(&self) -> Result<Option<String>, ApiError> {
        serde_json::to_string(&self.0).map(Some).map_err(ApiError::Encoding)
    }
}
