use crate::{
    auth::middleware::AuthUser,
    chat::{ChatSession, ChatTurn},
    types::{ChatRequest, Result},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

/// Open a conversation with the wellness companion
#[utoipa::path(
    post,
    path = "/api/chat/sessions",
    responses(
        (status = 201, description = "Conversation opened with the greeting", body = ChatSession),
        (status = 303, description = "Not signed in")
    ),
    security(("bearer_auth" = [])),
    tag = "chat"
)]
pub async fn create_session(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> (StatusCode, Json<ChatSession>) {
    let session = state.sessions.create(principal.id());
    (StatusCode::CREATED, Json(session))
}

/// Get a conversation
#[utoipa::path(
    get,
    path = "/api/chat/sessions/{id}",
    params(("id" = Uuid, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Conversation", body = ChatSession),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "chat"
)]
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>> {
    Ok(Json(state.sessions.get(principal.id(), id)?))
}

/// Close a conversation and discard its messages
#[utoipa::path(
    delete,
    path = "/api/chat/sessions/{id}",
    params(("id" = Uuid, Path, description = "Conversation id")),
    responses(
        (status = 204, description = "Closed"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "chat"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove(principal.id(), id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Send a message and receive the companion's reply
#[utoipa::path(
    post,
    path = "/api/chat/sessions/{id}/messages",
    params(("id" = Uuid, Path, description = "Conversation id")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply (generated or fallback)", body = ChatTurn),
        (status = 400, description = "Blank message"),
        (status = 404, description = "Not found"),
        (status = 409, description = "A reply is still pending")
    ),
    security(("bearer_auth" = [])),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatTurn>> {
    let turn = state
        .sessions
        .submit(&state.chat, principal.id(), id, &payload.message)
        .await?;
    Ok(Json(turn))
}
