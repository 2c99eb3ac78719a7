//! Identity provider seam.
//!
//! Sign-up, sign-in and session bookkeeping belong to an external identity
//! service. The rest of the crate only sees the [`IdentityProvider`] trait and
//! the [`Principal`] it resolves. [`InMemoryIdentityProvider`] backs local
//! runs and tests.

use crate::auth::jwt::AuthService;
use crate::types::{
    AppError, Claims, LoginRequest, Principal, Result, SessionResponse, SignUpRequest,
    TokenResponse, TokenType,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and open a session for it.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SessionResponse>;

    /// Open a session for an existing account.
    async fn sign_in(&self, request: &LoginRequest) -> Result<SessionResponse>;

    /// Exchange a refresh token for a fresh token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse>;

    /// End the sign-in session `token` belongs to. Every token minted for
    /// that session, refresh tokens included, stops working.
    async fn sign_out(&self, token: &str) -> Result<()>;

    /// Resolve an access token to its principal.
    async fn principal_for_token(&self, token: &str) -> Result<Principal>;
}

struct StoredUser {
    principal: Principal,
    password_hash: String,
}

/// Keys that stop being accepted, each kept only until the `exp` (unix
/// seconds) after which no token it could match is valid anyway.
#[derive(Default)]
struct Revocations {
    entries: HashMap<String, usize>,
}

impl Revocations {
    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Record `key` and drop expired entries. Returns false if `key` was
    /// already recorded.
    fn insert(&mut self, key: String, exp: usize) -> bool {
        let now = Utc::now().timestamp() as usize;
        self.entries.retain(|_, entry_exp| *entry_exp > now);
        self.entries.insert(key, exp).is_none()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Identity provider that keeps accounts in process memory.
pub struct InMemoryIdentityProvider {
    auth: Arc<AuthService>,
    users: RwLock<HashMap<String, StoredUser>>,
    ids_by_email: RwLock<HashMap<String, String>>,
    /// Sign-in sessions ended by sign-out, by session id.
    ended_sessions: RwLock<Revocations>,
    /// Refresh tokens already exchanged, by token hash.
    spent_refresh_tokens: RwLock<Revocations>,
}

impl InMemoryIdentityProvider {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self {
            auth,
            users: RwLock::new(HashMap::new()),
            ids_by_email: RwLock::new(HashMap::new()),
            ended_sessions: RwLock::new(Revocations::default()),
            spent_refresh_tokens: RwLock::new(Revocations::default()),
        }
    }

    /// Number of revocation records currently held.
    pub fn revocation_count(&self) -> usize {
        self.ended_sessions.read().len() + self.spent_refresh_tokens.read().len()
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn validate(request: &SignUpRequest) -> Result<()> {
        if request.display_name.trim().is_empty() {
            return Err(AppError::InvalidInput("Display name is required".to_string()));
        }
        if !request.email.contains('@') {
            return Err(AppError::InvalidInput("A valid email is required".to_string()));
        }
        if request.password != request.confirm_password {
            return Err(AppError::InvalidInput("Passwords do not match".to_string()));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn session_for(&self, principal: Principal) -> Result<SessionResponse> {
        let tokens = self.auth.generate_tokens(&principal)?;
        Ok(SessionResponse { principal, tokens })
    }

    /// Verify `token`, require its type and reject it if its session ended.
    fn live_claims(&self, token: &str, expected: TokenType) -> Result<Claims> {
        let claims = self.auth.verify_token(token)?;
        if claims.typ != expected {
            return Err(AppError::Auth("Wrong token type".to_string()));
        }
        if self.ended_sessions.read().contains(&claims.sid) {
            return Err(AppError::Auth("Session has ended".to_string()));
        }
        Ok(claims)
    }

    fn principal_for(&self, claims: &Claims) -> Result<Principal> {
        self.users
            .read()
            .get(&claims.sub)
            .map(|user| user.principal.clone())
            .ok_or_else(|| AppError::Auth("Unknown account".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<SessionResponse> {
        Self::validate(request)?;

        let email = normalize_email(&request.email);
        let password_hash = self.auth.hash_password(&request.password)?;
        let principal = Principal::new(
            Uuid::new_v4().to_string(),
            request.display_name.trim(),
            email.clone(),
            request.role,
        );

        {
            let mut ids = self.ids_by_email.write();
            if ids.contains_key(&email) {
                return Err(AppError::Conflict(
                    "An account with this email already exists".to_string(),
                ));
            }
            ids.insert(email, principal.id().to_string());
            self.users.write().insert(
                principal.id().to_string(),
                StoredUser {
                    principal: principal.clone(),
                    password_hash,
                },
            );
        }

        info!(user_id = %principal.id(), role = %principal.role(), "account created");
        self.session_for(principal)
    }

    async fn sign_in(&self, request: &LoginRequest) -> Result<SessionResponse> {
        let email = normalize_email(&request.email);
        let (principal, password_hash) = {
            let id = self
                .ids_by_email
                .read()
                .get(&email)
                .cloned()
                .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;
            let users = self.users.read();
            let user = users
                .get(&id)
                .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;
            (user.principal.clone(), user.password_hash.clone())
        };

        if !self
            .auth
            .verify_password(&request.password, &password_hash)?
        {
            return Err(AppError::Auth("Invalid credentials".to_string()));
        }

        info!(user_id = %principal.id(), "signed in");
        self.session_for(principal)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse> {
        let claims = self.live_claims(refresh_token, TokenType::Refresh)?;
        let principal = self.principal_for(&claims)?;

        if !self
            .spent_refresh_tokens
            .write()
            .insert(self.auth.hash_token(refresh_token), claims.exp)
        {
            return Err(AppError::Auth("Refresh token already used".to_string()));
        }

        debug!(user_id = %claims.sub, "token pair rotated");
        self.auth.rotate_tokens(&principal, &claims.sid)
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        let claims = self.auth.verify_token(token)?;
        // Outlives every token already minted for this session.
        let exp = (Utc::now() + Duration::seconds(self.auth.max_token_lifetime())).timestamp();
        self.ended_sessions
            .write()
            .insert(claims.sid.clone(), exp as usize);
        info!(user_id = %claims.sub, "signed out");
        Ok(())
    }

    async fn principal_for_token(&self, token: &str) -> Result<Principal> {
        let claims = self.live_claims(token, TokenType::Access)?;
        self.principal_for(&claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn provider() -> InMemoryIdentityProvider {
        InMemoryIdentityProvider::new(Arc::new(AuthService::new(
            "test-secret-key-that-is-at-least-32-chars".to_string(),
            900,
            604800,
        )))
    }

    fn signup(email: &str, role: Role) -> SignUpRequest {
        SignUpRequest {
            display_name: "Sarah Johnson".to_string(),
            email: email.to_string(),
            password: "calm-waters".to_string(),
            confirm_password: "calm-waters".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_sign_up_then_resolve_principal() {
        let idp = provider();
        let session = idp.sign_up(&signup("Sarah@Email.com", Role::User)).await.unwrap();

        assert_eq!(session.principal.email(), "sarah@email.com");
        assert_eq!(session.principal.role(), Role::User);

        let resolved = idp
            .principal_for_token(&session.tokens.access_token)
            .await
            .unwrap();
        assert_eq!(resolved, session.principal);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_mismatched_passwords() {
        let idp = provider();
        let mut req = signup("a@b.com", Role::User);
        req.confirm_password = "different".to_string();

        let err = idp.sign_up(&req).await.unwrap_err();
        assert!(err.to_string().contains("Passwords do not match"));
        assert!(idp.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_rejects_short_password() {
        let idp = provider();
        let mut req = signup("a@b.com", Role::User);
        req.password = "12345".to_string();
        req.confirm_password = "12345".to_string();

        let err = idp.sign_up(&req).await.unwrap_err();
        assert!(err.to_string().contains("at least 6 characters"));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let idp = provider();
        idp.sign_up(&signup("dup@example.com", Role::User)).await.unwrap();

        let err = idp
            .sign_up(&signup("DUP@example.com", Role::Counselor))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(idp.len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let idp = provider();
        idp.sign_up(&signup("c@example.com", Role::Counselor)).await.unwrap();

        let ok = idp
            .sign_in(&LoginRequest {
                email: "c@example.com".to_string(),
                password: "calm-waters".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.principal.role(), Role::Counselor);

        let bad = idp
            .sign_in(&LoginRequest {
                email: "c@example.com".to_string(),
                password: "nope-nope".to_string(),
            })
            .await;
        assert!(matches!(bad, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() {
        let idp = provider();
        let session = idp.sign_up(&signup("d@example.com", Role::Admin)).await.unwrap();
        let token = session.tokens.access_token;

        idp.sign_out(&token).await.unwrap();

        assert!(idp.principal_for_token(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_sign_out_ends_refresh_token_of_same_session() {
        let idp = provider();
        let session = idp.sign_up(&signup("f@example.com", Role::User)).await.unwrap();
        let other = idp
            .sign_in(&LoginRequest {
                email: "f@example.com".to_string(),
                password: "calm-waters".to_string(),
            })
            .await
            .unwrap();

        idp.sign_out(&session.tokens.access_token).await.unwrap();

        let err = idp.refresh(&session.tokens.refresh_token).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));

        // A separate sign-in is untouched.
        assert!(idp
            .principal_for_token(&other.tokens.access_token)
            .await
            .is_ok());
        assert!(idp.refresh(&other.tokens.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_out_also_ends_rotated_tokens() {
        let idp = provider();
        let session = idp.sign_up(&signup("g@example.com", Role::User)).await.unwrap();
        let rotated = idp.refresh(&session.tokens.refresh_token).await.unwrap();

        idp.sign_out(&session.tokens.access_token).await.unwrap();

        assert!(idp.principal_for_token(&rotated.access_token).await.is_err());
        assert!(idp.refresh(&rotated.refresh_token).await.is_err());
    }

    #[tokio::test]
    async fn test_token_types_are_not_interchangeable() {
        let idp = provider();
        let session = idp.sign_up(&signup("h@example.com", Role::User)).await.unwrap();

        assert!(idp
            .principal_for_token(&session.tokens.refresh_token)
            .await
            .is_err());
        assert!(idp.refresh(&session.tokens.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_refresh_issues_new_pair() {
        let idp = provider();
        let session = idp.sign_up(&signup("e@example.com", Role::User)).await.unwrap();

        let tokens = idp.refresh(&session.tokens.refresh_token).await.unwrap();
        let principal = idp.principal_for_token(&tokens.access_token).await.unwrap();
        assert_eq!(principal.id(), session.principal.id());
    }

    #[tokio::test]
    async fn test_refresh_token_is_single_use() {
        let idp = provider();
        let session = idp.sign_up(&signup("i@example.com", Role::User)).await.unwrap();

        let rotated = idp.refresh(&session.tokens.refresh_token).await.unwrap();
        assert!(idp.refresh(&session.tokens.refresh_token).await.is_err());
        assert!(idp.refresh(&rotated.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_revocations_are_pruned() {
        let idp = provider();
        let long_ago = (Utc::now() - Duration::days(30)).timestamp() as usize;
        idp.ended_sessions
            .write()
            .entries
            .insert("stale-session".to_string(), long_ago);
        idp.spent_refresh_tokens
            .write()
            .entries
            .insert("stale-token".to_string(), long_ago);
        assert_eq!(idp.revocation_count(), 2);

        let session = idp.sign_up(&signup("j@example.com", Role::User)).await.unwrap();
        idp.refresh(&session.tokens.refresh_token).await.unwrap();
        idp.sign_out(&session.tokens.access_token).await.unwrap();

        assert!(!idp.ended_sessions.read().contains("stale-session"));
        assert!(!idp.spent_refresh_tokens.read().contains("stale-token"));
        assert_eq!(idp.revocation_count(), 2);
    }
}
