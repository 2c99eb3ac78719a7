use crate::api::handlers::{auth, booking, catalog, chat, dashboard, guard};
use crate::auth::{guard::ProtectedRoute, identity::IdentityProvider};
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Wrap `router` with the guard for `route`'s required role.
fn gated(
    router: Router<AppState>,
    identity: &Arc<dyn IdentityProvider>,
    route: ProtectedRoute,
) -> Router<AppState> {
    let identity = identity.clone();
    let required = route.required_role();
    router.layer(middleware::from_fn(move |req, next| {
        crate::auth::middleware::require_access(identity.clone(), required, req, next)
    }))
}

pub fn create_router(identity: Arc<dyn IdentityProvider>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/guard", get(guard::check_route))
        .route("/catalog/filters", get(catalog::filters))
        .route("/counselors", get(catalog::list_counselors))
        .route("/counselors/{id}", get(catalog::get_counselor))
        .route("/events", get(catalog::list_events))
        .route("/resources", get(catalog::list_resources));

    // Any signed-in principal
    let session_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/chat/sessions", post(chat::create_session))
        .route(
            "/chat/sessions/{id}",
            get(chat::get_session).delete(chat::delete_session),
        )
        .route("/chat/sessions/{id}/messages", post(chat::send_message));

    let booking_routes = Router::new()
        .route("/bookings/quote", post(booking::quote))
        .route("/bookings", post(booking::confirm));

    // Role dashboards
    let user_routes = Router::new().route("/dashboard/user", get(dashboard::user_dashboard));
    let counselor_routes =
        Router::new().route("/dashboard/counselor", get(dashboard::counselor_dashboard));
    let admin_routes = Router::new().route("/dashboard/admin", get(dashboard::admin_dashboard));

    public_routes
        .merge(gated(session_routes, &identity, ProtectedRoute::Chat))
        .merge(gated(booking_routes, &identity, ProtectedRoute::Book))
        .merge(gated(user_routes, &identity, ProtectedRoute::UserDashboard))
        .merge(gated(
            counselor_routes,
            &identity,
            ProtectedRoute::CounselorDashboard,
        ))
        .merge(gated(admin_routes, &identity, ProtectedRoute::AdminDashboard))
}
