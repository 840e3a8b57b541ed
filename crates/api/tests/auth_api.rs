//! HTTP-level integration tests for signup, signin, refresh, logout, and `/me`.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_bytes, body_json, get, get_auth, post_json, set_cookie_line, set_cookies};
use sqlx::SqlitePool;
use stagehand_api::auth::cookies::{
    ACCESS_COOKIE, ACCESS_CSRF_COOKIE, REFRESH_COOKIE, REFRESH_CSRF_COOKIE,
};
use stagehand_api::auth::jwt::{validate_token, TokenKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn signup_body(username: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "email": format!("{username}@stagehand.test"),
        "password": "curtain-call-42",
    })
}

/// Sign up through the API and return the response JSON plus the cookies it set.
async fn signup(
    app: axum::Router,
    username: &str,
) -> (serde_json::Value, std::collections::HashMap<String, String>) {
    let response = post_json(app, "/api/v1/signup", signup_body(username)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookies = set_cookies(&response);
    (body_json(response).await, cookies)
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_returns_user_and_sets_all_cookies(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/signup", signup_body("ada")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookies = set_cookies(&response);
    for name in [ACCESS_COOKIE, REFRESH_COOKIE, ACCESS_CSRF_COOKIE, REFRESH_CSRF_COOKIE] {
        assert!(cookies.contains_key(name), "missing cookie {name}");
    }
    let access_line = set_cookie_line(&response, ACCESS_COOKIE).unwrap();
    assert!(access_line.contains("HttpOnly"));
    let csrf_line = set_cookie_line(&response, ACCESS_CSRF_COOKIE).unwrap();
    assert!(!csrf_line.contains("HttpOnly"));

    let json = body_json(response).await;
    assert!(json["user"]["id"].is_number());
    assert_eq!(json["user"]["username"], "ada");
    assert_eq!(json["user"]["email"], "ada@stagehand.test");
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("password").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_access_token_resolves_to_same_user_at_me(pool: SqlitePool) {
    let (json, cookies) = signup(common::build_test_app(pool.clone()), "grace").await;
    let user_id = json["user"]["id"].as_i64().unwrap();

    let token = &cookies[ACCESS_COOKIE];
    let claims = validate_token(token, TokenKind::Access, &common::test_config().jwt).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.csrf, cookies[ACCESS_CSRF_COOKIE]);

    let response = get_auth(common::build_test_app(pool), "/api/v1/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["id"], user_id);
    assert_eq!(me["username"], "grace");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_duplicate_email_is_rejected_with_error_key(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "linus").await;

    let body = serde_json::json!({
        "username": "linus2",
        "email": "linus@stagehand.test",
        "password": "curtain-call-42",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&response).is_empty());
    let json = body_json(response).await;
    assert_eq!(json["error"], "Username or email is already registered");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_duplicate_username_is_rejected(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "margaret").await;

    let body = serde_json::json!({
        "username": "margaret",
        "email": "other@stagehand.test",
        "password": "curtain-call-42",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_with_invalid_or_missing_data_returns_400_error(pool: SqlitePool) {

    let cases = [
        serde_json::json!({ "username": "ok_name", "email": "ok@stagehand.test", "password": "short" }),
        serde_json::json!({ "username": "ok_name", "email": "not-an-email", "password": "long-enough-1" }),
        serde_json::json!({ "username": "x", "email": "ok@stagehand.test", "password": "long-enough-1" }),
        serde_json::json!({ "email": "ok@stagehand.test" }),
    ];
    for body in cases {
        let response =
            post_json(common::build_test_app(pool.clone()), "/api/v1/signup", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert!(json["error"].is_string(), "body: {body}");
        assert_eq!(json["code"], "SIGNUP_REJECTED");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signup_with_wrong_typed_or_unparseable_body_returns_400_error(pool: SqlitePool) {
    let wrong_type = serde_json::json!({
        "username": 12345,
        "email": "typed@stagehand.test",
        "password": "long-enough-1",
    });
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/v1/signup", wrong_type).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SIGNUP_REJECTED");
    assert!(json["error"].is_string());
    assert!(json.get("message").is_none());

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/signup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "SIGNUP_REJECTED");
}

// ---------------------------------------------------------------------------
// Signin
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn signin_with_correct_password_returns_user_and_cookies(pool: SqlitePool) {
    let (signed_up, _) = signup(common::build_test_app(pool.clone()), "hopper").await;

    let body = serde_json::json!({ "email": "hopper@stagehand.test", "password": "curtain-call-42" });
    let response = post_json(common::build_test_app(pool), "/api/v1/signin", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.contains_key(ACCESS_COOKIE));
    assert!(cookies.contains_key(REFRESH_COOKIE));
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], signed_up["user"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signin_accepts_legacy_password_field_name(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "legacy").await;

    let body = serde_json::json!({
        "email": "legacy@stagehand.test",
        "password_hash": "curtain-call-42",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/signin", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signin_wrong_password_and_unknown_email_look_the_same(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "turing").await;

    let wrong_password = serde_json::json!({ "email": "turing@stagehand.test", "password": "nope-nope-nope" });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/signin", wrong_password).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let first = body_json(response).await;
    assert_eq!(first["error"], "Invalid credentials");

    let unknown = serde_json::json!({ "email": "ghost@stagehand.test", "password": "nope-nope-nope" });
    let response = post_json(common::build_test_app(pool), "/api/v1/signin", unknown).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let second = body_json(response).await;
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn me_without_token_returns_401_error(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_rejects_garbage_and_malformed_authorization(pool: SqlitePool) {

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .uri("/api/v1/me")
        .header("authorization", "Token abc")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_accepts_access_cookie_on_get_without_csrf_header(pool: SqlitePool) {
    let (json, cookies) = signup(common::build_test_app(pool.clone()), "cookie_user").await;

    let request = common::request_with_cookies(
        Method::GET,
        "/api/v1/me",
        &[(ACCESS_COOKIE, &cookies[ACCESS_COOKIE])],
        None,
    );
    let response = common::send(common::build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], json["user"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_falls_back_to_cookie_when_authorization_is_not_bearer(pool: SqlitePool) {
    let (json, cookies) = signup(common::build_test_app(pool.clone()), "basic_user").await;

    let request = axum::http::Request::builder()
        .uri("/api/v1/me")
        .header("authorization", "Basic Zm9vOmJhcg==")
        .header(
            "cookie",
            format!("{ACCESS_COOKIE}={}", cookies[ACCESS_COOKIE]),
        )
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], json["user"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn me_rejects_refresh_token(pool: SqlitePool) {
    let (_, cookies) = signup(common::build_test_app(pool.clone()), "wrong_kind").await;

    let response =
        get_auth(common::build_test_app(pool), "/api/v1/me", &cookies[REFRESH_COOKIE]).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_cookie_and_csrf_issues_new_access_cookie(pool: SqlitePool) {
    let (json, cookies) = signup(common::build_test_app(pool.clone()), "refresher").await;

    let request = common::request_with_cookies(
        Method::POST,
        "/api/v1/refresh_token",
        &[(REFRESH_COOKIE, &cookies[REFRESH_COOKIE])],
        Some(&cookies[REFRESH_CSRF_COOKIE]),
    );
    let response = common::send(common::build_test_app(pool), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = set_cookies(&response);
    assert!(refreshed.contains_key(ACCESS_COOKIE));
    assert!(refreshed.contains_key(ACCESS_CSRF_COOKIE));
    assert!(!refreshed.contains_key(REFRESH_COOKIE));
    assert_eq!(body_json(response).await["user"]["id"], json["user"]["id"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_cookie_without_matching_csrf_header_is_rejected(pool: SqlitePool) {
    let (_, cookies) = signup(common::build_test_app(pool.clone()), "csrf_user").await;
    let refresh_cookie = [(REFRESH_COOKIE, cookies[REFRESH_COOKIE].as_str())];

    let missing = common::request_with_cookies(
        Method::POST,
        "/api/v1/refresh_token",
        &refresh_cookie,
        None,
    );
    let response = common::send(common::build_test_app(pool.clone()), missing).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Missing CSRF token");

    let mismatched = common::request_with_cookies(
        Method::POST,
        "/api/v1/refresh_token",
        &refresh_cookie,
        Some("not-the-right-value"),
    );
    let response = common::send(common::build_test_app(pool), mismatched).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "CSRF token does not match");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_bearer_refresh_token_needs_no_csrf(pool: SqlitePool) {
    let (_, cookies) = signup(common::build_test_app(pool.clone()), "bearer_refresh").await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/refresh_token")
        .header("authorization", format!("Bearer {}", cookies[REFRESH_COOKIE]))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_access_token_is_rejected(pool: SqlitePool) {
    let (_, cookies) = signup(common::build_test_app(pool.clone()), "access_as_refresh").await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/refresh_token")
        .header("authorization", format!("Bearer {}", cookies[ACCESS_COOKIE]))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = common::send(common::build_test_app(pool), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_clears_every_token_cookie(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = common::delete(app, "/api/v1/logout").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    for name in [ACCESS_COOKIE, REFRESH_COOKIE, ACCESS_CSRF_COOKIE, REFRESH_CSRF_COOKIE] {
        let line = set_cookie_line(&response, name)
            .unwrap_or_else(|| panic!("logout must clear {name}"));
        assert!(line.contains("Max-Age=0"), "{name} not expired: {line}");
    }
    assert!(body_bytes(response).await.is_empty());
}
