use axum::{extract::State, response::IntoResponse, routing::{get, post}, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{created_response, message_response, success_response, validate_input};
use crate::auth::{SessionContext, SessionState};
use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionInfo {
    #[serde(flatten)]
    pub state: SessionState,
    pub created_at: Option<DateTime<Utc>>,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(current_session))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered"),
        (status = 400, description = "Missing username or password", body = crate::errors::ErrorResponse),
        (status = 409, description = "Username already exists", body = crate::errors::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    state
        .services
        .auth
        .register(&payload.username, &payload.password)
        .await?;
    Ok(created_response(
        serde_json::json!({ "username": payload.username }),
        "User registered successfully.",
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = crate::errors::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    validate_input(&payload)?;
    if !state
        .services
        .auth
        .login(&payload.username, &payload.password)
        .await?
    {
        return Err(ServiceError::Unauthorized(
            "Invalid username or password.".into(),
        ));
    }

    let token = state.sessions.open(&payload.username);
    info!(username = %payload.username, "logged in");
    Ok(message_response(
        LoginResponse {
            token: token.to_string(),
            username: payload.username,
        },
        "Logged in successfully.",
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    state.sessions.close(&session.token);
    info!(username = %session.username, "logged out");
    Ok(message_response(
        SessionInfo {
            state: SessionState::LoggedOut,
            created_at: None,
        },
        "Logged out.",
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/session",
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse),
    ),
    security(("Bearer" = [])),
    tag = "auth"
)]
pub async fn current_session(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<impl IntoResponse, ServiceError> {
    let created_at = state.sessions.get(&session.token).map(|s| s.created_at);
    Ok(success_response(SessionInfo {
        state: SessionState::LoggedIn {
            username: session.username,
        },
        created_at,
    }))
}
