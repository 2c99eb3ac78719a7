use crate::{
    auth::middleware::{AuthUser, BearerToken},
    types::{
        AppError, LoginRequest, Principal, RefreshRequest, Result, SessionResponse, SignUpRequest,
        TokenResponse,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};

/// Create an account and sign in
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created", body = SessionResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<Json<SessionResponse>> {
    let session = state.identity.sign_up(&payload).await?;
    Ok(Json(session))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }
    let session = state.identity.sign_in(&payload).await?;
    Ok(Json(session))
}

/// Refresh access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 401, description = "Invalid or revoked refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    let tokens = state.identity.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 303, description = "Not signed in")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode> {
    state.identity.sign_out(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current principal
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Signed-in principal", body = Principal),
        (status = 303, description = "Not signed in")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(AuthUser(principal): AuthUser) -> Json<Principal> {
    Json(principal)
}
