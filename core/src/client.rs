//! The generic request helper.
//!
//! # Design
//! `TypedClient` holds a `ClientConfig` and an injected `Transport` and
//! carries no mutable state between calls. A request is split the same way
//! on every endpoint: `build` turns a descriptor's body into an
//! `HttpRequest`, the transport executes it, and `parse` turns the
//! `HttpResponse` into the descriptor's response type. `request` chains the
//! three; `build` and `parse` stay public so the wire form can be checked
//! without any I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, StatusPolicy};
use crate::descriptor::{Descriptor, RequestBody};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Issues typed requests against `ClientConfig::base_url` through `T`.
#[derive(Debug, Clone)]
pub struct TypedClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> TypedClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Produce the request `D` would send to `endpoint`.
    ///
    /// `endpoint` is appended verbatim to the base URL. A body is never
    /// attached to a `GET`.
    pub fn build<D: Descriptor>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &D::Body,
    ) -> Result<HttpRequest, ApiError> {
        let url = format!("{}{endpoint}", self.config.base_url());
        let body = match (method, body.encode()?) {
            (HttpMethod::Get, Some(_)) => {
                warn!(%url, "dropping request body on GET");
                None
            }
            (_, body) => body,
        };
        let headers = match body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };
        debug!(%method, %url, has_body = body.is_some(), "built request");
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decode `response` as `D::Response`.
    ///
    /// The declared type is trusted: there is no validation beyond what
    /// deserializing into it implies.
    pub fn parse<D: Descriptor>(&self, response: HttpResponse) -> Result<D::Response, ApiError> {
        if !response.is_success() {
            match self.config.status_policy() {
                StatusPolicy::RequireSuccess => {
                    return Err(ApiError::HttpStatus {
                        status: response.status,
                        body: response.body,
                    })
                }
                StatusPolicy::Ignore => {
                    warn!(status = response.status, "decoding non-success response");
                }
            }
        }
        let value: Value = serde_json::from_str(&response.body).map_err(ApiError::Decoding)?;
        serde_json::from_value(value).map_err(|source| ApiError::Shape {
            expected: std::any::type_name::<D::Response>(),
            source,
        })
    }
}

impl<T: Transport> TypedClient<T> {
    /// Perform one round trip for descriptor `D`.
    pub async fn request<D: Descriptor>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: D::Body,
    ) -> Result<D::Response, ApiError> {
        let request = self.build::<D>(method, endpoint, &body)?;
        let response = self.transport.send(request).await?;
        debug!(status = response.status, "received response");
        self.parse::<D>(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::descriptor::Json;
    use crate::users::{CreateUser, GetUser, User};

    /// Replies with a canned response and records every request it sees.
    struct StubTransport {
        reply: Result<HttpResponse, String>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<HttpRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map_err(ApiError::Transport)
        }
    }

    /// Sends the request body straight back as the response body.
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: request.body.unwrap_or_default(),
            })
        }
    }

    /// A POST-capable descriptor reused for a GET.
    struct PostShapedGet;

    impl Descriptor for PostShapedGet {
        type Body = Json<User>;
        type Response = User;
    }

    /// A POST that carries no payload.
    struct Heartbeat;

    impl Descriptor for Heartbeat {
        type Body = ();
        type Response = User;
    }

    fn kumar() -> User {
        User {
            name: "Kumar".to_string(),
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_without_body() {
        let client = TypedClient::new(EchoTransport);
        let req = client.build::<GetUser>(HttpMethod::Get, "/users/1", &()).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://api.com/v1/users/1");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_serializes_exact_body() {
        let client = TypedClient::new(EchoTransport);
        let req = client
            .build::<CreateUser>(HttpMethod::Post, "/users", &Json(kumar()))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://api.com/v1/users");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"name":"Kumar"}"#));
    }

    #[test]
    fn build_get_drops_body_from_body_capable_descriptor() {
        let client = TypedClient::new(EchoTransport);
        let req = client
            .build::<PostShapedGet>(HttpMethod::Get, "/users/1", &Json(kumar()))
            .unwrap();
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_post_without_body() {
        let client = TypedClient::new(EchoTransport);
        let req = client.build::<Heartbeat>(HttpMethod::Post, "/heartbeat", &()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://api.com/v1/heartbeat");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn endpoint_is_appended_verbatim() {
        let config = ClientConfig::default().with_base_url("http://localhost:3000/v1/");
        let client = TypedClient::with_config(config, EchoTransport);
        let req = client
            .build::<GetUser>(HttpMethod::Get, "/users/a b?x=1", &())
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/v1/users/a b?x=1");
    }

    #[test]
    fn parse_malformed_payload_is_decoding_error() {
        let client = TypedClient::new(EchoTransport);
        let err = client.parse::<GetUser>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decoding(_)));
    }

    #[test]
    fn parse_wrong_shape_is_shape_error() {
        let client = TypedClient::new(EchoTransport);
        let err = client
            .parse::<GetUser>(response(200, r#"{"nickname":"K"}"#))
            .unwrap_err();
        match err {
            ApiError::Shape { expected, .. } => assert!(expected.ends_with("User")),
            other => panic!("expected Shape, got {other:?}"),
        }
    }

    #[test]
    fn parse_ignores_status_by_default() {
        let client = TypedClient::new(EchoTransport);
        let user = client
            .parse::<GetUser>(response(500, r#"{"name":"Kumar"}"#))
            .unwrap();
        assert_eq!(user, kumar());
    }

    #[test]
    fn parse_rejects_status_when_required() {
        let config = ClientConfig::default().with_status_policy(StatusPolicy::RequireSuccess);
        let client = TypedClient::with_config(config, EchoTransport);
        let err = client
            .parse::<GetUser>(response(500, "internal error"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 500, ref body } if body == "internal error"));
    }

    #[tokio::test]
    async fn get_user_decodes_stub_payload() {
        let client = TypedClient::new(StubTransport::replying(200, r#"{"name":"Kumar"}"#));
        let user = client
            .request::<GetUser>(HttpMethod::Get, "/users/1", ())
            .await
            .unwrap();
        assert_eq!(user, kumar());

        let seen = client.transport().seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "https://api.com/v1/users/1");
        assert!(seen[0].body.is_none());
    }

    #[tokio::test]
    async fn post_transmits_serialized_body() {
        let client = TypedClient::new(StubTransport::replying(201, r#"{"name":"Kumar"}"#));
        client
            .request::<CreateUser>(HttpMethod::Post, "/users", Json(kumar()))
            .await
            .unwrap();

        let seen = client.transport().seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].body.as_deref(), Some(r#"{"name":"Kumar"}"#));
    }

    #[tokio::test]
    async fn post_without_body_transmits_nothing() {
        let client = TypedClient::new(StubTransport::replying(200, r#"{"name":"Kumar"}"#));
        client
            .request::<Heartbeat>(HttpMethod::Post, "/heartbeat", ())
            .await
            .unwrap();

        let seen = client.transport().seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert!(seen[0].body.is_none());
        assert!(seen[0].headers.is_empty());
    }

    #[tokio::test]
    async fn echoed_body_round_trips() {
        let client = TypedClient::new(EchoTransport);
        let user = client
            .request::<CreateUser>(HttpMethod::Post, "/users", Json(kumar()))
            .await
            .unwrap();
        assert_eq!(user, kumar());
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let client = TypedClient::new(StubTransport::failing("connection refused"));
        let err = client
            .request::<GetUser>(HttpMethod::Get, "/users/1", ())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref m) if m == "connection refused"));
    }

    #[tokio::test]
    async fn malformed_response_fails_instead_of_defaulting() {
        let client = TypedClient::new(StubTransport::replying(200, "<html>oops</html>"));
        let err = client
            .request::<GetUser>(HttpMethod::Get, "/users/1", ())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decoding(_)));
    }

    #[tokio::test]
    async fn encoding_failure_happens_before_transport() {
        use serde::ser::Error as _;

        struct Broken;

        impl serde::Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
                Err(S::Error::custom("broken"))
            }
        }

        struct SendBroken;

        impl Descriptor for SendBroken {
            type Body = Json<Broken>;
            type Response = User;
        }

        let client = TypedClient::new(StubTransport::replying(200, r#"{"name":"Kumar"}"#));
        let err = client
            .request::<SendBroken>(HttpMethod::Post, "/users", Json(Broken))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
        assert!(client.transport().seen().is_empty());
    }
}
