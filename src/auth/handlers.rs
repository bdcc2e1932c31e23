use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RefreshRequest, RegisterRequest, TokenPairResponse},
        jwt::{JwtKeys, TokenKind},
        password::hash_password,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
    validate::is_valid_email,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    if payload.username.is_empty() {
        warn!("empty username");
        return Err(ApiError::Validation("Username must not be empty".into()));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    // Argon2 is deliberately slow; keep it off the request dispatch path.
    let password = payload.password.clone();
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::from(e)))??;

    let user = User::create(&state.db, &payload.username, &payload.email, &hash).await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(PublicUser {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = User::authenticate(&state.db, &payload.email, &payload.password).await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(&user.email)?;
    let refresh_token = keys.sign_refresh(&user.email)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenPairResponse::new(access_token, refresh_token)))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys
        .verify(&payload.refresh_token, TokenKind::Refresh)
        .map_err(|e| {
            warn!(error = %e, "refresh token rejected");
            ApiError::Unauthenticated
        })?;

    // The subject must still exist before a new pair is issued.
    let user = User::find_by_email(&state.db, &claims.sub)
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    let access_token = keys.sign_access(&user.email)?;
    let refresh_token = keys.sign_refresh(&user.email)?;

    info!(user_id = %user.id, "token pair refreshed");
    Ok(Json(TokenPairResponse::new(access_token, refresh_token)))
}
