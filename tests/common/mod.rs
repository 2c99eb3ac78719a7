//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod mocks;

use axum_test::TestServer;
use feelora::{
    auth::jwt::AuthService, create_app, types::Role, AppState, FeeloraConfig,
    InMemoryIdentityProvider,
};
use mocks::MockLLMClient;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test_jwt_secret_key_for_testing_only";
pub const TEST_PASSWORD: &str = "calm-waters-42";

/// Full application backed by an in-memory identity provider and `llm`.
pub fn create_test_server(llm: MockLLMClient) -> TestServer {
    let auth = Arc::new(AuthService::new(TEST_JWT_SECRET.to_string(), 900, 604800));
    let identity = Arc::new(InMemoryIdentityProvider::new(auth));
    let state = AppState::new(FeeloraConfig::default(), identity, Arc::new(llm));
    TestServer::new(create_app(state)).expect("Failed to create test server")
}

/// Sign up an account with `role` and return the session response body.
pub async fn sign_up(server: &TestServer, email: &str, role: Role) -> Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "display_name": "Test Member",
            "email": email,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
            "role": role,
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

/// Sign up and return just the access token.
pub async fn access_token(server: &TestServer, email: &str, role: Role) -> String {
    let body = sign_up(server, email, role).await;
    body["access_token"]
        .as_str()
        .expect("access_token missing")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
