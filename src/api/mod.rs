//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Feelora, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/signup` - Create an account and sign in
//! - `POST /api/auth/login` - Sign in and receive a token pair
//! - `POST /api/auth/refresh` - Exchange a refresh token
//! - `POST /api/auth/logout` - Revoke the current session
//! - `GET /api/auth/me` - Signed-in principal
//! - `GET /api/guard?path=` - Route guard decision for a navigation path
//!
//! ## Catalog
//! - `GET /api/catalog/filters` - Specialty and category choices
//! - `GET /api/counselors`, `GET /api/counselors/{id}`
//! - `GET /api/events`
//! - `GET /api/resources`
//!
//! ## Bookings (signed in)
//! - `POST /api/bookings/quote` - Summary of a selection
//! - `POST /api/bookings` - Confirm a booking
//!
//! ## Chat (signed in)
//! - `POST /api/chat/sessions` - Open a conversation
//! - `GET|DELETE /api/chat/sessions/{id}`
//! - `POST /api/chat/sessions/{id}/messages` - Send a message
//!
//! ## Dashboards (role-gated)
//! - `GET /api/dashboard/user?tab=`
//! - `GET /api/dashboard/counselor?tab=`
//! - `GET /api/dashboard/admin?tab=`
//!
//! # Authentication
//!
//! Gated endpoints read a session token from the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//! Requests the guard refuses get `303 See Other` pointing at `/login`
//! (no session) or `/` (wrong role).
//!
//! # OpenAPI Documentation
//!
//! The generated document is served at `/api-docs/openapi.json`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Feelora API", description = "Mental-wellness platform API"),
    paths(
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::refresh_token,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::guard::check_route,
        handlers::catalog::filters,
        handlers::catalog::list_counselors,
        handlers::catalog::get_counselor,
        handlers::catalog::list_events,
        handlers::catalog::list_resources,
        handlers::booking::quote,
        handlers::booking::confirm,
        handlers::chat::create_session,
        handlers::chat::get_session,
        handlers::chat::delete_session,
        handlers::chat::send_message,
        handlers::dashboard::user_dashboard,
        handlers::dashboard::counselor_dashboard,
        handlers::dashboard::admin_dashboard,
    ),
    components(schemas(
        crate::types::Role,
        crate::types::Principal,
        crate::types::SignUpRequest,
        crate::types::LoginRequest,
        crate::types::RefreshRequest,
        crate::types::TokenResponse,
        crate::types::SessionResponse,
        crate::types::ChatRequest,
        crate::auth::guard::GuardDecision,
        crate::auth::guard::ProtectedRoute,
        crate::catalog::Counselor,
        crate::catalog::SessionMedium,
        crate::catalog::EventListing,
        crate::catalog::EventType,
        crate::catalog::Resource,
        crate::catalog::ResourceType,
        crate::catalog::FilterOptions,
        crate::booking::BookingRequest,
        crate::booking::BookingSummary,
        crate::booking::BookingConfirmation,
        crate::chat::ChatSession,
        crate::chat::ChatMessage,
        crate::chat::ChatTurn,
        crate::chat::Sender,
        crate::chat::TurnState,
        crate::chat::ReplySource,
        crate::dashboard::TabInfo,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign-in and route guard"),
        (name = "catalog", description = "Counselors, events and resources"),
        (name = "bookings", description = "Counselor booking"),
        (name = "chat", description = "AI wellness companion"),
        (name = "dashboard", description = "Role dashboards")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
