//! HTTP API tests against the full router with an in-memory identity
//! provider and a mocked text-generation service.

mod common;

use axum::http::StatusCode;
use common::mocks::MockLLMClient;
use common::{access_token, bearer, create_test_server, sign_up, TEST_PASSWORD};
use feelora::chat::{FALLBACK_REPLY, GREETING};
use feelora::types::Role;
use rstest::rstest;
use serde_json::{json, Value};

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/chat/sessions/{id}/messages"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

// ============= Authentication Tests =============

#[tokio::test]
async fn test_signup_returns_principal_and_tokens() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let body = sign_up(&server, "member@example.com", Role::User).await;
    assert_eq!(body["principal"]["email"], "member@example.com");
    assert_eq!(body["principal"]["role"], "user");
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert!(body["expires_in"].is_number());
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    sign_up(&server, "twice@example.com", Role::User).await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "display_name": "Again",
            "email": "Twice@Example.com",
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_mismatched_passwords() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "display_name": "Typo",
            "email": "typo@example.com",
            "password": TEST_PASSWORD,
            "confirm_password": "something-else",
        }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Passwords do not match");
}

#[tokio::test]
async fn test_login_and_me() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    sign_up(&server, "login@example.com", Role::Counselor).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "login@example.com", "password": TEST_PASSWORD}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let token = body["access_token"].as_str().unwrap();

    let me = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(token))
        .await;
    me.assert_status_ok();
    let principal: Value = me.json();
    assert_eq!(principal["email"], "login@example.com");
    assert_eq!(principal["role"], "counselor");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    sign_up(&server, "wrong@example.com", Role::User).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "wrong@example.com", "password": "not-it-at-all"}))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": " ", "password": ""}))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_refresh_issues_new_tokens() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let body = sign_up(&server, "refresh@example.com", Role::User).await;

    let response = server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": body["refresh_token"]}))
        .await;
    response.assert_status_ok();
    let tokens: Value = response.json();
    assert!(tokens["access_token"].is_string());
    assert_ne!(tokens["refresh_token"], body["refresh_token"]);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let body = sign_up(&server, "bye@example.com", Role::User).await;
    let token = body["access_token"].as_str().unwrap();

    server
        .post("/api/auth/logout")
        .add_header("Authorization", bearer(token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let me = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(token))
        .await;
    me.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(me.header("location"), "/login");

    server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": body["refresh_token"]}))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_refresh_token_is_not_a_bearer_token() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let body = sign_up(&server, "typed@example.com", Role::User).await;

    let me = server
        .get("/api/auth/me")
        .add_header(
            "Authorization",
            bearer(body["refresh_token"].as_str().unwrap()),
        )
        .await;
    me.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(me.header("location"), "/login");
}

#[tokio::test]
async fn test_refresh_token_cannot_be_reused() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let body = sign_up(&server, "rotate@example.com", Role::User).await;

    server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": body["refresh_token"]}))
        .await
        .assert_status_ok();

    server
        .post("/api/auth/refresh")
        .json(&json!({"refresh_token": body["refresh_token"]}))
        .await
        .assert_status_unauthorized();
}

// ============= Route Guard Tests =============

#[rstest]
#[case("/api/dashboard/user")]
#[case("/api/dashboard/counselor")]
#[case("/api/dashboard/admin")]
#[case("/api/auth/me")]
#[tokio::test]
async fn test_anonymous_requests_redirect_to_sign_in(#[case] path: &str) {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server.get(path).await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_invalid_token_redirects_to_sign_in() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server
        .get("/api/dashboard/user")
        .add_header("Authorization", "Bearer not-a-real-token")
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

#[rstest]
#[case(Role::User, "/api/dashboard/user", true)]
#[case(Role::User, "/api/dashboard/counselor", false)]
#[case(Role::User, "/api/dashboard/admin", false)]
#[case(Role::Counselor, "/api/dashboard/counselor", true)]
#[case(Role::Counselor, "/api/dashboard/user", false)]
#[case(Role::Admin, "/api/dashboard/admin", true)]
#[case(Role::Admin, "/api/dashboard/user", false)]
#[tokio::test]
async fn test_dashboards_are_role_gated(
    #[case] role: Role,
    #[case] path: &str,
    #[case] allowed: bool,
) {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "gated@example.com", role).await;

    let response = server
        .get(path)
        .add_header("Authorization", bearer(&token))
        .await;

    if allowed {
        response.assert_status_ok();
    } else {
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");
    }
}

#[tokio::test]
async fn test_guard_endpoint_reports_decisions() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "guard@example.com", Role::User).await;

    let anonymous: Value = server
        .get("/api/guard")
        .add_query_param("path", "/chat")
        .await
        .json();
    assert_eq!(anonymous["decision"], "redirect_to_sign_in");
    assert_eq!(anonymous["destination"], "/login");

    let wrong_role: Value = server
        .get("/api/guard")
        .add_query_param("path", "/dashboard/admin")
        .add_header("Authorization", bearer(&token))
        .await
        .json();
    assert_eq!(wrong_role["decision"], "redirect_to_default");
    assert_eq!(wrong_role["destination"], "/");
    assert_eq!(wrong_role["required_role"], "admin");

    let public: Value = server
        .get("/api/guard")
        .add_query_param("path", "/events")
        .await
        .json();
    assert_eq!(public["decision"], "allow");
    assert!(public["destination"].is_null());
}

#[tokio::test]
async fn test_guard_endpoint_requires_path() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    server
        .get("/api/guard")
        .add_query_param("path", "  ")
        .await
        .assert_status_bad_request();
}

// ============= Catalog Tests =============

#[tokio::test]
async fn test_filter_options() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let body: Value = server.get("/api/catalog/filters").await.json();
    assert_eq!(body["specialties"][0], "All");
    assert_eq!(body["event_categories"][0], "All");
    assert_eq!(body["resource_categories"][0], "All");
}

#[tokio::test]
async fn test_list_counselors_unfiltered_and_filtered() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let all: Vec<Value> = server.get("/api/counselors").await.json();
    assert_eq!(all.len(), 4);

    let anxiety: Vec<Value> = server
        .get("/api/counselors")
        .add_query_param("specialty", "Anxiety")
        .await
        .json();
    assert!(!anxiety.is_empty());
    assert!(anxiety.len() < all.len());
    for counselor in &anxiety {
        let specialties = counselor["specialties"].as_array().unwrap();
        assert!(specialties.iter().any(|s| s == "Anxiety"));
    }

    let nobody: Vec<Value> = server
        .get("/api/counselors")
        .add_query_param("search", "zzz-no-such-counselor")
        .await
        .json();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_get_counselor_by_id() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let all: Vec<Value> = server.get("/api/counselors").await.json();
    let id = all[0]["id"].as_str().unwrap();

    let response = server.get(&format!("/api/counselors/{}", id)).await;
    response.assert_status_ok();
    let counselor: Value = response.json();
    assert_eq!(counselor["id"], id);

    server
        .get("/api/counselors/no-such-id")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_list_events_includes_spots_left() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let events: Vec<Value> = server.get("/api/events").await.json();
    assert_eq!(events.len(), 6);
    for event in &events {
        let capacity = event["capacity"].as_u64().unwrap();
        let registered = event["registered"].as_u64().unwrap();
        assert_eq!(
            event["spots_left"].as_u64().unwrap(),
            capacity.saturating_sub(registered)
        );
    }

    let workshops: Vec<Value> = server
        .get("/api/events")
        .add_query_param("type", "workshop")
        .await
        .json();
    assert!(workshops.iter().all(|e| e["type"] == "workshop"));
}

#[tokio::test]
async fn test_list_resources_by_type() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let all: Vec<Value> = server.get("/api/resources").await.json();
    assert_eq!(all.len(), 6);

    let videos: Vec<Value> = server
        .get("/api/resources")
        .add_query_param("type", "video")
        .await
        .json();
    assert!(!videos.is_empty());
    assert!(videos.iter().all(|r| r["type"] == "video"));
}

// ============= Booking Tests =============

async fn first_counselor(server: &axum_test::TestServer) -> Value {
    let all: Vec<Value> = server.get("/api/counselors").await.json();
    all[0].clone()
}

#[tokio::test]
async fn test_booking_quote_without_time_is_disabled() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "quote@example.com", Role::User).await;
    let counselor = first_counselor(&server).await;

    let response = server
        .post("/api/bookings/quote")
        .add_header("Authorization", bearer(&token))
        .json(&json!({"counselor_id": counselor["id"]}))
        .await;
    response.assert_status_ok();
    let summary: Value = response.json();
    assert_eq!(summary["enabled"], false);
    assert_eq!(summary["price"], counselor["price"]);
    assert!(summary["time"].is_null());
}

#[tokio::test]
async fn test_booking_confirm() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "book@example.com", Role::User).await;
    let counselor = first_counselor(&server).await;
    let slot = counselor["availability"][0].clone();

    let response = server
        .post("/api/bookings")
        .add_header("Authorization", bearer(&token))
        .json(&json!({"counselor_id": counselor["id"], "time": slot}))
        .await;
    response.assert_status_ok();
    let confirmation: Value = response.json();
    assert_eq!(confirmation["counselor_id"], counselor["id"]);
    assert_eq!(confirmation["time"], slot);
    assert!(confirmation["message"]
        .as_str()
        .unwrap()
        .starts_with("Booking confirmed with"));
}

#[tokio::test]
async fn test_booking_rejects_unknown_slot_and_missing_time() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "slots@example.com", Role::User).await;
    let counselor = first_counselor(&server).await;

    server
        .post("/api/bookings")
        .add_header("Authorization", bearer(&token))
        .json(&json!({"counselor_id": counselor["id"], "time": "Sunday 3:00 AM"}))
        .await
        .assert_status_bad_request();

    server
        .post("/api/bookings")
        .add_header("Authorization", bearer(&token))
        .json(&json!({"counselor_id": counselor["id"]}))
        .await
        .assert_status_bad_request();

    server
        .post("/api/bookings")
        .add_header("Authorization", bearer(&token))
        .json(&json!({"counselor_id": "no-such-id"}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_booking_requires_sign_in() {
    let server = create_test_server(MockLLMClient::replying("hi"));

    let response = server
        .post("/api/bookings")
        .json(&json!({"counselor_id": "1"}))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/login");
}

// ============= Dashboard Tests =============

#[tokio::test]
async fn test_user_dashboard_defaults_to_first_tab() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "dash@example.com", Role::User).await;

    let page: Value = server
        .get("/api/dashboard/user")
        .add_header("Authorization", bearer(&token))
        .await
        .json();
    assert_eq!(page["active_tab"], "overview");
    assert_eq!(page["tabs"].as_array().unwrap().len(), 4);
    assert_eq!(page["panel"]["tab"], "overview");
}

#[tokio::test]
async fn test_dashboard_tab_selection() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "admin@example.com", Role::Admin).await;

    let response = server
        .get("/api/dashboard/admin")
        .add_query_param("tab", "reports")
        .add_header("Authorization", bearer(&token))
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["active_tab"], "reports");

    server
        .get("/api/dashboard/admin")
        .add_query_param("tab", "billing")
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status_bad_request();
}

// ============= Chat Tests =============

async fn open_chat(server: &axum_test::TestServer, token: &str) -> Value {
    let response = server
        .post("/api/chat/sessions")
        .add_header("Authorization", bearer(token))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_chat_session_starts_with_greeting() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let token = access_token(&server, "chat@example.com", Role::User).await;

    let session = open_chat(&server, &token).await;
    assert_eq!(session["state"], "idle");
    let messages = session["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "assistant");
    assert_eq!(messages[0]["content"], GREETING);
}

#[tokio::test]
async fn test_chat_turn_appends_user_and_reply() {
    let llm = MockLLMClient::replying("  It sounds like a heavy week.  ");
    let server = create_test_server(llm.clone());
    let token = access_token(&server, "turn@example.com", Role::User).await;
    let session = open_chat(&server, &token).await;
    let id = session["id"].as_str().unwrap();

    let response = server
        .post(&format!("/api/chat/sessions/{}/messages", id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({"message": "I'm feeling anxious"}))
        .await;
    response.assert_status_ok();
    let turn: Value = response.json();
    assert_eq!(turn["user_message"]["content"], "I'm feeling anxious");
    assert_eq!(turn["reply"]["content"], "It sounds like a heavy week.");
    assert_eq!(turn["reply"]["sender"], "assistant");
    assert_eq!(turn["source"], "generated");

    assert_eq!(llm.call_count(), 1);
    assert!(llm.prompts()[0].contains("User: I'm feeling anxious"));

    let stored: Value = server
        .get(&format!("/api/chat/sessions/{}", id))
        .add_header("Authorization", bearer(&token))
        .await
        .json();
    assert_eq!(stored["messages"].as_array().unwrap().len(), 3);
    assert_eq!(stored["state"], "idle");
}

#[tokio::test]
async fn test_chat_failure_yields_fallback() {
    let llm = MockLLMClient::failing();
    let server = create_test_server(llm.clone());
    let token = access_token(&server, "fallback@example.com", Role::User).await;
    let session = open_chat(&server, &token).await;
    let id = session["id"].as_str().unwrap();

    let response = server
        .post(&format!("/api/chat/sessions/{}/messages", id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({"message": "I'm feeling anxious"}))
        .await;
    response.assert_status_ok();
    let turn: Value = response.json();
    assert_eq!(turn["reply"]["content"], FALLBACK_REPLY);
    assert_eq!(turn["source"], "fallback");
    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_chat_blank_message_is_rejected_without_a_call() {
    let llm = MockLLMClient::replying("hi");
    let server = create_test_server(llm.clone());
    let token = access_token(&server, "blank@example.com", Role::User).await;
    let session = open_chat(&server, &token).await;
    let id = session["id"].as_str().unwrap();

    server
        .post(&format!("/api/chat/sessions/{}/messages", id))
        .add_header("Authorization", bearer(&token))
        .json(&json!({"message": "   \n\t"}))
        .await
        .assert_status_bad_request();
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_chat_context_keeps_three_most_recent_turns() {
    let llm = MockLLMClient::replying("I hear you.");
    let server = create_test_server(llm.clone());
    let token = access_token(&server, "context@example.com", Role::User).await;
    let session = open_chat(&server, &token).await;
    let id = session["id"].as_str().unwrap();

    for message in ["turn-one", "turn-two", "turn-three", "turn-four", "turn-five"] {
        server
            .post(&format!("/api/chat/sessions/{}/messages", id))
            .add_header("Authorization", bearer(&token))
            .json(&json!({"message": message}))
            .await
            .assert_status_ok();
    }

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 5);
    assert!(!prompts[0].contains("Previous conversation context"));
    let last = &prompts[4];
    assert!(last.contains("Previous conversation context: turn-two | turn-three | turn-four"));
    assert!(!last.contains("turn-one"));
}

#[tokio::test]
async fn test_chat_sessions_are_private_to_their_owner() {
    let server = create_test_server(MockLLMClient::replying("hi"));
    let owner = access_token(&server, "owner@example.com", Role::User).await;
    let other = access_token(&server, "other@example.com", Role::User).await;
    let session = open_chat(&server, &owner).await;
    let id = session["id"].as_str().unwrap();

    server
        .get(&format!("/api/chat/sessions/{}", id))
        .add_header("Authorization", bearer(&other))
        .await
        .assert_status_not_found();

    server
        .delete(&format!("/api/chat/sessions/{}", id))
        .add_header("Authorization", bearer(&owner))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/api/chat/sessions/{}", id))
        .add_header("Authorization", bearer(&owner))
        .await
        .assert_status_not_found();
}
