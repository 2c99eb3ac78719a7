//! Route protection.
//!
//! [`RouteGuard::decide`] is the single place where a principal's role is
//! compared against a route's requirement. [`ProtectedRoute`] is the table of
//! gated paths.

use crate::types::{Principal, Role};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_PATH: &str = "/login";
/// Where signed-in visitors without the required role are sent.
pub const DEFAULT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToSignIn,
    RedirectToDefault,
}

impl GuardDecision {
    /// Navigation target for a redirect, `None` when access is allowed.
    pub fn destination(&self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToSignIn => Some(SIGN_IN_PATH),
            GuardDecision::RedirectToDefault => Some(DEFAULT_PATH),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

pub struct RouteGuard;

impl RouteGuard {
    pub fn decide(principal: Option<&Principal>, required: Option<Role>) -> GuardDecision {
        let Some(principal) = principal else {
            return GuardDecision::RedirectToSignIn;
        };

        match (required, principal.role()) {
            (None, _) => GuardDecision::Allow,
            (Some(Role::User), Role::User)
            | (Some(Role::Counselor), Role::Counselor)
            | (Some(Role::Admin), Role::Admin) => GuardDecision::Allow,
            (Some(Role::User | Role::Counselor | Role::Admin), _) => {
                GuardDecision::RedirectToDefault
            }
        }
    }
}

/// Paths that require a signed-in principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProtectedRoute {
    Chat,
    Book,
    UserDashboard,
    CounselorDashboard,
    AdminDashboard,
}

impl ProtectedRoute {
    pub fn all() -> [ProtectedRoute; 5] {
        [
            ProtectedRoute::Chat,
            ProtectedRoute::Book,
            ProtectedRoute::UserDashboard,
            ProtectedRoute::CounselorDashboard,
            ProtectedRoute::AdminDashboard,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            ProtectedRoute::Chat => "/chat",
            ProtectedRoute::Book => "/book",
            ProtectedRoute::UserDashboard => "/dashboard/user",
            ProtectedRoute::CounselorDashboard => "/dashboard/counselor",
            ProtectedRoute::AdminDashboard => "/dashboard/admin",
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            ProtectedRoute::Chat | ProtectedRoute::Book => None,
            ProtectedRoute::UserDashboard => Some(Role::User),
            ProtectedRoute::CounselorDashboard => Some(Role::Counselor),
            ProtectedRoute::AdminDashboard => Some(Role::Admin),
        }
    }

    /// Resolve a navigation path. Trailing slashes are ignored; anything not
    /// in the table is public.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::all().into_iter().find(|route| route.path() == trimmed)
    }

    pub fn check(&self, principal: Option<&Principal>) -> GuardDecision {
        RouteGuard::decide(principal, self.required_role())
    }
}

/// Guard decision for an arbitrary navigation path.
pub fn decide_path(path: &str, principal: Option<&Principal>) -> GuardDecision {
    match ProtectedRoute::from_path(path) {
        Some(route) => route.check(principal),
        None => GuardDecision::Allow,
    }
}
