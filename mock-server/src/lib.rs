use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Admin,
    Staff,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    #[serde(rename = "type")]
    pub kind: RoleType,
}

/// Users are addressed by their 1-based position. The first user created is
/// the admin, everyone after is staff.
pub type Db = Arc<RwLock<Vec<User>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/v1/users", post(create_user))
        .route("/v1/users/{id}", get(get_user))
        .route("/v1/users/{id}/role", get(get_user_role))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    info!(addr = ?listener.local_addr().ok(), "mock server listening");
    axum::serve(listener, app()).await
}

async fn create_user(State(db): State<Db>, Json(input): Json<User>) -> (StatusCode, Json<User>) {
    let mut users = db.write().await;
    users.push(input.clone());
    info!(id = users.len(), name = %input.name, "created user");
    (StatusCode::CREATED, Json(input))
}

async fn get_user(State(db): State<Db>, Path(id): Path<usize>) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    lookup(&users, id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_user_role(
    State(db): State<Db>,
    Path(id): Path<usize>,
) -> Result<Json<UserRole>, StatusCode> {
    let users = db.read().await;
    lookup(&users, id).ok_or(StatusCode::NOT_FOUND)?;
    let kind = if id == 1 { RoleType::Admin } else { RoleType::Staff };
    Ok(Json(UserRole { kind }))
}

fn lookup(users: &[User], id: usize) -> Option<&User> {
    id.checked_sub(1).and_then(|index| users.get(index))
}
