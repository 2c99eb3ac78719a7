//! # Feelora - Mental Wellness Platform Server
//!
//! Counselor discovery and booking, wellness events and resources,
//! role-gated dashboards and an AI wellness companion, served as a JSON API.
//!
//! ## Overview
//!
//! Feelora can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `feelora-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ### Wellness chat
//!
//! ```rust,ignore
//! use feelora::{GeminiClient, WellnessChat};
//! use feelora::chat::UserText;
//! use std::sync::Arc;
//!
//! let llm = GeminiClient::new(api_key, api_base, "gemini-pro".to_string());
//! let chat = WellnessChat::new(Arc::new(llm));
//!
//! let text = UserText::parse("I'm feeling anxious").unwrap();
//! let reply = chat.send_turn(&text, &[]).await;
//! println!("{}", reply.text);
//! ```
//!
//! ### Route guard
//!
//! ```rust,ignore
//! use feelora::auth::guard::{GuardDecision, RouteGuard};
//! use feelora::types::Role;
//!
//! let decision = RouteGuard::decide(principal.as_ref(), Some(Role::Counselor));
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Identity provider, route guard and middleware
//! - [`booking`] - Counselor booking selection
//! - [`catalog`] - Counselor, event and resource listings
//! - [`chat`] - AI wellness companion
//! - [`dashboard`] - Role dashboards
//! - [`llm`] - Text-generation client
//! - [`types`] - Common types and error handling
//!
//! ## Configuration
//!
//! Infrastructure settings come from `feelora.toml`; secrets come from the
//! environment variables it names (see [`utils::toml_config`]).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Identity, route guard and middleware.
pub mod auth;
/// Counselor booking selection and confirmation.
pub mod booking;
/// Static counselor, event and resource catalogs.
pub mod catalog;
/// AI wellness companion.
pub mod chat;
/// Command-line interface.
pub mod cli;
/// Role dashboards.
pub mod dashboard;
/// Text-generation clients.
pub mod llm;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::identity::{IdentityProvider, InMemoryIdentityProvider};
pub use chat::{ChatSessionStore, WellnessChat};
pub use llm::{GeminiClient, LLMClient};
pub use types::{AppError, Result};
pub use utils::toml_config::FeeloraConfig;

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Infrastructure configuration
    pub config: Arc<FeeloraConfig>,
    /// Identity provider backing sign-in and the route guard
    pub identity: Arc<dyn IdentityProvider>,
    /// Wellness companion
    pub chat: WellnessChat,
    /// Open chat conversations
    pub sessions: Arc<ChatSessionStore>,
}

impl AppState {
    pub fn new(
        config: FeeloraConfig,
        identity: Arc<dyn IdentityProvider>,
        llm: Arc<dyn LLMClient>,
    ) -> Self {
        let sessions = ChatSessionStore::with_limits(
            config.chat.max_sessions_per_owner,
            chrono::Duration::seconds(config.chat.session_idle_ttl),
        );
        Self {
            config: Arc::new(config),
            identity,
            chat: WellnessChat::new(llm),
            sessions: Arc::new(sessions),
        }
    }
}

/// Build the full HTTP application: `/health`, the `/api` routes and the
/// OpenAPI document.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(api::ApiDoc::openapi()) }),
        )
        .nest("/api", api::routes::create_router(state.identity.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
