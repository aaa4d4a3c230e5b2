//! Integration tests for the authentication flow.

mod helpers;

use portal_auth::password::fingerprint_token;
use portal_core::ErrorKind;
use portal_entity::user::LoginRequest;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_register_login_refresh_replay() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com").await;
    let bob = app.register("bob@example.com").await;

    let pair = app.login("alice@example.com").await;
    let ctx = app.context(&pair);
    assert_eq!(ctx.user_id, alice);

    let me = app.users.get_by_id(&ctx, alice).await.unwrap();
    assert_eq!(me.email, "alice@example.com");

    let err = app.users.get_by_id(&ctx, bob).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert_eq!(err.to_response().code, 403);

    let refresh_ctx = app.sessions.authenticate_refresh(&pair.refresh_token).unwrap();
    let rotated = app.sessions.refresh(refresh_ctx).await.unwrap();
    assert_eq!(app.context(&rotated).user_id, alice);

    let replay_ctx = app.sessions.authenticate_refresh(&pair.refresh_token).unwrap();
    let err = app.sessions.refresh(replay_ctx).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.to_response().code, 401);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_identical() {
    let app = TestApp::new();
    app.register("carol@example.com").await;

    let wrong = app
        .sessions
        .login(LoginRequest {
            email: "carol@example.com".into(),
            password: "Nope123!".into(),
        })
        .await
        .unwrap_err();
    let unknown = app
        .sessions
        .login(LoginRequest {
            email: "nobody@example.com".into(),
            password: "Nope123!".into(),
        })
        .await
        .unwrap_err();

    let wrong_body = serde_json::to_value(wrong.to_response()).unwrap();
    let unknown_body = serde_json::to_value(unknown.to_response()).unwrap();
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["code"], 401);
    assert_eq!(wrong_body["status"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_response_hides_refresh_token() {
    let app = TestApp::new();
    app.register("dave@example.com").await;
    let pair = app.login("dave@example.com").await;

    let body = serde_json::to_value(&pair).unwrap();
    assert!(body.get("access_token").is_some());
    assert!(body.get("refresh_token").is_none());
    assert!(!body.to_string().contains(&pair.refresh_token));
}

#[tokio::test]
async fn test_logout_then_refresh_rejected() {
    let app = TestApp::new();
    app.register("erin@example.com").await;
    let pair = app.login("erin@example.com").await;

    app.sessions.logout(&pair.refresh_token).await.unwrap();
    app.sessions.logout(&pair.refresh_token).await.unwrap();

    let record = app
        .session_store
        .get(&fingerprint_token(&pair.refresh_token))
        .unwrap();
    assert!(record.revoked);

    let ctx = app.sessions.authenticate_refresh(&pair.refresh_token).unwrap();
    let err = app.sessions.refresh(ctx).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_access_token_rejected_as_refresh() {
    let app = TestApp::new();
    app.register("frank@example.com").await;
    let pair = app.login("frank@example.com").await;

    let err = app.sessions.authenticate_refresh(&pair.access_token).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    let err = app
        .sessions
        .authenticate(&format!("Bearer {}", pair.refresh_token))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_deleted_user_cannot_log_in() {
    let app = TestApp::new();
    let grace = app.register("grace@example.com").await;
    let pair = app.login("grace@example.com").await;
    let ctx = app.context(&pair);

    app.users.delete_by_id(&ctx, grace).await.unwrap();

    let err = app
        .sessions
        .login(LoginRequest {
            email: "grace@example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.public_kind(), ErrorKind::Unauthorized);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logout_and_refresh() {
    let app = TestApp::new();
    app.register("heidi@example.com").await;
    let pair = app.login("heidi@example.com").await;
    let ctx = app.sessions.authenticate_refresh(&pair.refresh_token).unwrap();

    let (logout, refresh) = tokio::join!(
        app.sessions.logout(&pair.refresh_token),
        app.sessions.refresh(ctx)
    );

    assert!(logout.is_ok());
    let record = app
        .session_store
        .get(&fingerprint_token(&pair.refresh_token))
        .unwrap();
    assert!(record.revoked);
    if let Err(e) = refresh {
        assert_eq!(e.kind, ErrorKind::Unauthorized);
    }
}
