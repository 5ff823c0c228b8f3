/// Integration tests for the TaskDeck API
///
/// These tests drive the full router over an in-memory store:
/// - Registration and login, including conflict and enumeration behavior
/// - Bearer-token gating of the task endpoints
/// - Task lifecycle (create → update → delete, clear completed)
/// - Per-user ownership isolation
/// - Enum coercion at the API boundary

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, TestContext};
use serde_json::json;
use taskdeck_shared::auth::jwt;
use uuid::Uuid;

#[tokio::test]
async fn test_register_returns_token_and_public_user() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_json(
            "/api/register",
            json!({"username": "alice", "email": "alice@x.com", "password": "secret1"}),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;

    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "alice@x.com");
    // The hash never leaves the server
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password").is_none());

    // The token verifies against the signing secret and names the user
    let claims = jwt::validate_token(body["token"].as_str().unwrap(), common::TEST_SECRET).unwrap();
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.sub.to_string(), body["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_register_short_password_creates_no_user() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_json(
            "/api/register",
            json!({"username": "alice", "email": "alice@x.com", "password": "short"}),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Password must be at least 6 characters");

    let users = ctx.store.backend().load_users().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let ctx = TestContext::new();

    let response = ctx
        .send(post_json(
            "/api/register",
            json!({"username": "alice", "password": "secret1"}),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_register_duplicate_email_and_username() {
    let ctx = TestContext::new();
    ctx.register("alice", "alice@x.com", "secret1").await;

    // Same email, different username and password
    let response = ctx
        .send(post_json(
            "/api/register",
            json!({"username": "alice2", "email": "alice@x.com", "password": "other-password"}),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "User with this email already exists");

    // Same username, different email
    let response = ctx
        .send(post_json(
            "/api/register",
            json!({"username": "alice", "email": "alice2@x.com", "password": "secret1"}),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Username already taken");

    let users = ctx.store.backend().load_users().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_login_roundtrip() {
    let ctx = TestContext::new();
    ctx.register("alice", "alice@x.com", "secret1").await;

    let response = ctx
        .send(post_json(
            "/api/login",
            json!({"email": "alice@x.com", "password": "secret1"}),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");

    let claims = jwt::validate_token(body["token"].as_str().unwrap(), common::TEST_SECRET).unwrap();
    assert_eq!(claims.email, "alice@x.com");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new();
    ctx.register("alice", "alice@x.com", "secret1").await;

    // Wrong password for a real account
    let wrong_password = ctx
        .send(post_json(
            "/api/login",
            json!({"email": "alice@x.com", "password": "wrong-password"}),
            None,
        ))
        .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    // Unknown email entirely
    let unknown_email = ctx
        .send(post_json(
            "/api/login",
            json!({"email": "nobody@x.com", "password": "secret1"}),
            None,
        ))
        .await;
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email = body_json(unknown_email).await;

    // Identical message in both cases: no account enumeration
    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_task_endpoints_require_token() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/api/tasks", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = ctx.send(get("/api/tasks", Some("garbage-token"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_task_defaults() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let task = ctx.create_task(&token, json!({"text": "buy milk"})).await;

    assert_eq!(task["text"], "buy milk");
    assert_eq!(task["completed"], false);
    assert_eq!(task["priority"], "low");
    assert_eq!(task["status"], "todo");
    // Server-assigned fields are present and well-formed
    assert!(Uuid::parse_str(task["id"].as_str().unwrap()).is_ok());
    assert!(task["createdAt"].as_str().unwrap().contains('T'));
}

#[tokio::test]
async fn test_create_task_empty_text_does_not_mutate_storage() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let response = ctx
        .send(post_json("/api/tasks", json!({"text": "   "}), Some(&token)))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Task text is required");

    assert!(ctx.store.backend().load_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_task_coerces_invalid_enums() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let task = ctx
        .create_task(
            &token,
            json!({"text": "odd one", "priority": "urgent", "status": "archived"}),
        )
        .await;

    assert_eq!(task["priority"], "low");
    assert_eq!(task["status"], "todo");
}

#[tokio::test]
async fn test_update_task_partial_and_enum_rules() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let task = ctx
        .create_task(&token, json!({"text": "buy milk", "status": "inprogress"}))
        .await;
    let id = task["id"].as_str().unwrap();

    // Toggle completed only: status must stay inprogress
    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", id),
            json!({"completed": true}),
            Some(&token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["status"], "inprogress");

    // Unrecognized status is dropped, prior value retained
    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", id),
            json!({"status": "blocked"}),
            Some(&token),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "inprogress");

    // Unrecognized priority resets to the default, as on create
    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", id),
            json!({"priority": "urgent"}),
            Some(&token),
        ))
        .await;
    let updated = body_json(response).await;
    assert_eq!(updated["priority"], "low");
}

#[tokio::test]
async fn test_update_missing_task_is_404() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", Uuid::new_v4()),
            json!({"completed": true}),
            Some(&token),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Task not found");
}

#[tokio::test]
async fn test_ownership_isolation() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice", "alice@x.com", "secret1").await;
    let bob = ctx.register("bob", "bob@x.com", "secret2").await;

    let task = ctx.create_task(&alice, json!({"text": "alice's task"})).await;
    let id = task["id"].as_str().unwrap();

    // Bob can't see it
    assert!(ctx.list_tasks(&bob).await.is_empty());

    // Bob can't mutate or delete it: 404, not 403, so ids don't leak
    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", id),
            json!({"completed": true}),
            Some(&bob),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .send(delete(&format!("/api/tasks/{}", id), Some(&bob)))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Alice still sees her task, untouched
    let tasks = ctx.list_tasks(&alice).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["completed"], false);
}

#[tokio::test]
async fn test_delete_completed_scoped_to_caller() {
    let ctx = TestContext::new();
    let alice = ctx.register("alice", "alice@x.com", "secret1").await;
    let bob = ctx.register("bob", "bob@x.com", "secret2").await;

    let a_done = ctx.create_task(&alice, json!({"text": "a done"})).await;
    ctx.create_task(&alice, json!({"text": "a open"})).await;
    let b_done = ctx.create_task(&bob, json!({"text": "b done"})).await;

    for (token, task) in [(&alice, &a_done), (&bob, &b_done)] {
        let response = ctx
            .send(put_json(
                &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
                json!({"completed": true}),
                Some(token),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = ctx.send(delete("/api/tasks", Some(&alice))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Completed tasks deleted successfully");

    let alices = ctx.list_tasks(&alice).await;
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0]["text"], "a open");

    // Bob's completed task is untouched
    let bobs = ctx.list_tasks(&bob).await;
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0]["completed"], true);
}

#[tokio::test]
async fn test_me_and_deleted_user_behavior() {
    let ctx = TestContext::new();
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    let response = ctx.send(get("/api/me", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");

    // Remove the user record out from under the still-valid token
    ctx.store.backend().save_users(&[]).await.unwrap();

    // /api/me notices the record is gone...
    let response = ctx.send(get("/api/me", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // ...but task endpoints trust the token without a user lookup
    let response = ctx.send(get("/api/tasks", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_scenario() {
    let ctx = TestContext::new();

    // register alice → 201 with token
    let token = ctx.register("alice", "alice@x.com", "secret1").await;

    // create {text: "buy milk"} → defaults applied
    let task = ctx.create_task(&token, json!({"text": "buy milk"})).await;
    assert_eq!(task["text"], "buy milk");
    assert_eq!(task["completed"], false);
    assert_eq!(task["priority"], "low");
    assert_eq!(task["status"], "todo");

    // list includes it, equal in all client-supplied fields
    let tasks = ctx.list_tasks(&token).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], task["id"]);
    assert_eq!(tasks[0]["text"], "buy milk");

    // toggle completed → true
    let response = ctx
        .send(put_json(
            &format!("/api/tasks/{}", task["id"].as_str().unwrap()),
            json!({"completed": true}),
            Some(&token),
        ))
        .await;
    let updated = body_json(response).await;
    assert_eq!(updated["completed"], true);

    // clear completed → list is empty
    let response = ctx.send(delete("/api/tasks", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(ctx.list_tasks(&token).await.is_empty());
}

#[tokio::test]
async fn test_health_endpoint() {
    let ctx = TestContext::new();

    let response = ctx.send(get("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "ok");
}
