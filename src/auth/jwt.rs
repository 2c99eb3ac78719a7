use crate::types::{AppError, Claims, Principal, Result, TokenResponse, TokenType};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

/// Session token and password hashing service.
///
/// Passwords are hashed with Argon2id; session tokens are HS256 JWTs that
/// carry the principal's id, email and role, the token type and the id of the
/// sign-in session they belong to.
pub struct AuthService {
    jwt_secret: String,
    access_expiry: i64,
    refresh_expiry: i64,
}

impl AuthService {
    /// Creates a new AuthService.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `access_expiry` - Access token validity in seconds
    /// * `refresh_expiry` - Refresh token validity in seconds
    pub fn new(jwt_secret: String, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            jwt_secret,
            access_expiry,
            refresh_expiry,
        }
    }

    /// Hashes a password using Argon2id.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Auth(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against an Argon2 hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Auth(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generates access and refresh tokens for a principal under a new
    /// sign-in session.
    pub fn generate_tokens(&self, principal: &Principal) -> Result<TokenResponse> {
        self.rotate_tokens(principal, &Uuid::new_v4().to_string())
    }

    /// Generates a fresh token pair inside an existing sign-in session.
    pub fn rotate_tokens(&self, principal: &Principal, session_id: &str) -> Result<TokenResponse> {
        let access_token = self.sign(principal, session_id, TokenType::Access)?;
        let refresh_token = self.sign(principal, session_id, TokenType::Refresh)?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
            expires_in: self.access_expiry,
        })
    }

    /// Longest lifetime of any token this service issues, in seconds.
    pub fn max_token_lifetime(&self) -> i64 {
        self.access_expiry.max(self.refresh_expiry)
    }

    fn sign(&self, principal: &Principal, session_id: &str, typ: TokenType) -> Result<String> {
        let ttl_seconds = match typ {
            TokenType::Access => self.access_expiry,
            TokenType::Refresh => self.refresh_expiry,
        };
        let now = Utc::now();
        let claims = Claims {
            sub: principal.id().to_string(),
            email: principal.email().to_string(),
            role: principal.role(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            sid: session_id.to_string(),
            typ,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Auth(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a JWT and returns its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))
    }

    /// SHA256 of a token, hex encoded. Used to remember revoked tokens
    /// without keeping the tokens themselves.
    pub fn hash_token(&self, token: &str) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
