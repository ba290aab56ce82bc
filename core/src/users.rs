//! The user API expressed as descriptors, plus thin helpers over them.
//!
//! The payload types are defined independently from the mock-server crate;
//! integration tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

use crate::client::TypedClient;
use crate::descriptor::{Descriptor, Json};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::transport::Transport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Admin,
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRole {
    #[serde(rename = "type")]
    pub kind: RoleType,
}

/// `GET /users/{id}`.
pub struct GetUser;

impl Descriptor for GetUser {
    type Body = ();
    type Response = User;
}

/// `POST /users`.
pub struct CreateUser;

impl Descriptor for CreateUser {
    type Body = Json<User>;
    type Response = User;
}

/// `GET /users/{id}/role`.
pub struct GetUserRole;

impl Descriptor for GetUserRole {
    type Body = ();
    type Response = UserRole;
}

pub async fn fetch_user<T: Transport>(client: &TypedClient<T>, id: u64) -> Result<User, ApiError> {
    client
        .request::<GetUser>(HttpMethod::Get, &format!("/users/{id}"), ())
        .await
}

pub async fn create_user<T: Transport>(client: &TypedClient<T>, user: User) -> Result<User, ApiError> {
    client
        .request::<CreateUser>(HttpMethod::Post, "/users", Json(user))
        .await
}

pub async fn fetch_user_role<T: Transport>(
    client: &TypedClient<T>,
    id: u64,
) -> Result<UserRole, ApiError> {
    client
        .request::<GetUserRole>(HttpMethod::Get, &format!("/users/{id}/role"), ())
        .await
}
