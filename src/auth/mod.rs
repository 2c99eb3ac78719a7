//! Authentication and Route Protection
//!
//! The identity service itself is external; this module holds the pieces of
//! authentication that live inside the application.
//!
//! # Module Structure
//!
//! - [`auth::identity`](crate::auth::identity) - `IdentityProvider` trait and an in-memory provider
//! - [`auth::jwt`](crate::auth::jwt) - session token encoding/decoding and password hashing
//! - [`auth::guard`](crate::auth::guard) - the route guard decision and the protected route table
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractors applying the guard
//!
//! # Usage
//!
//! ```ignore
//! use feelora::auth::guard::{RouteGuard, GuardDecision};
//! use feelora::types::Role;
//!
//! match RouteGuard::decide(principal.as_ref(), Some(Role::Admin)) {
//!     GuardDecision::Allow => render(),
//!     other => navigate(other.destination().unwrap()),
//! }
//! ```
//!
//! Protected HTTP routes are wrapped with
//! [`require_access`](crate::auth::middleware::require_access); handlers then
//! take the principal with the `AuthUser` extractor:
//!
//! ```ignore
//! async fn handler(AuthUser(principal): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", principal.display_name())
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `feelora.toml`:
//! ```toml
//! [auth]
//! jwt_secret_env = "JWT_SECRET"   # env var holding the signing secret
//! jwt_access_expiry = 900         # seconds
//! jwt_refresh_expiry = 604800     # seconds
//! ```

/// Route guard decision and the protected route table.
pub mod guard;
/// Identity provider abstraction and in-memory implementation.
pub mod identity;
/// JWT token generation, validation, and password hashing services.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
