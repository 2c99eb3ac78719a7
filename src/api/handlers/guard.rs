use crate::{
    auth::{
        guard::{GuardDecision, ProtectedRoute},
        middleware::resolve_principal,
    },
    types::{AppError, Result, Role},
    AppState,
};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GuardQuery {
    /// Navigation path, e.g. `/dashboard/admin`
    pub path: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuardResponse {
    pub path: String,
    pub decision: GuardDecision,
    /// Redirect target when not allowed
    pub destination: Option<String>,
    /// `None` for public paths and routes open to any signed-in role
    pub required_role: Option<Role>,
}

/// Evaluate the route table for the caller
#[utoipa::path(
    get,
    path = "/api/guard",
    params(GuardQuery),
    responses(
        (status = 200, description = "Guard decision", body = GuardResponse),
        (status = 400, description = "Missing path")
    ),
    tag = "auth"
)]
pub async fn check_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GuardQuery>,
) -> Result<Json<GuardResponse>> {
    if query.path.trim().is_empty() {
        return Err(AppError::InvalidInput("path is required".to_string()));
    }

    let principal = resolve_principal(state.identity.as_ref(), &headers).await;
    let route = ProtectedRoute::from_path(&query.path);
    let decision = match route {
        Some(route) => route.check(principal.as_ref()),
        None => GuardDecision::Allow,
    };

    Ok(Json(GuardResponse {
        path: query.path,
        decision,
        destination: decision.destination().map(str::to_string),
        required_role: route.and_then(|r| r.required_role()),
    }))
}
