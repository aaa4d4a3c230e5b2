//! Integration tests for user resource access.

mod helpers;

use portal_core::ErrorKind;
use portal_entity::user::{Role, UpdateUser};

use helpers::TestApp;

fn rename(first: &str, last: &str) -> UpdateUser {
    UpdateUser {
        first_name: Some(first.into()),
        last_name: Some(last.into()),
    }
}

#[tokio::test]
async fn test_list_degrades_to_self_for_regular_users() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com").await;
    app.register("bob@example.com").await;
    app.register_with_role("admin@example.com", Role::Admin).await;

    let alice_ctx = app.context(&app.login("alice@example.com").await);
    let own = app.users.list(&alice_ctx).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].id, alice);

    let admin_ctx = app.context(&app.login("admin@example.com").await);
    assert_eq!(admin_ctx.role, Role::Admin);
    assert_eq!(app.users.list(&admin_ctx).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_admin_manages_other_users() {
    let app = TestApp::new();
    let bob = app.register("bob@example.com").await;
    app.register_with_role("root@example.com", Role::SuperAdmin).await;
    let root = app.context(&app.login("root@example.com").await);

    app.users
        .update_by_id(&root, bob, rename("Robert", "O'Brien"))
        .await
        .unwrap();
    let updated = app.users.get_by_id(&root, bob).await.unwrap();
    assert_eq!(updated.first_name, "Robert");
    assert_eq!(updated.last_name, "O'Brien");

    app.users.delete_by_id(&root, bob).await.unwrap();
    let err = app.users.delete_by_id(&root, bob).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Gone);
    assert_eq!(err.to_response().code, 410);
}

#[tokio::test]
async fn test_stranger_cannot_update_or_delete() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com").await;
    app.register("mallory@example.com").await;
    let mallory = app.context(&app.login("mallory@example.com").await);

    let err = app
        .users
        .update_by_id(&mallory, alice, rename("Pwned", "User"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let err = app.users.delete_by_id(&mallory, alice).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let alice_ctx = app.context(&app.login("alice@example.com").await);
    let me = app.users.get_by_id(&alice_ctx, alice).await.unwrap();
    assert_eq!(me.first_name, "Test");
}

#[tokio::test]
async fn test_update_reports_all_invalid_fields() {
    let app = TestApp::new();
    let alice = app.register("alice@example.com").await;
    let ctx = app.context(&app.login("alice@example.com").await);

    let err = app
        .users
        .update_by_id(&ctx, alice, rename("", "L33t"))
        .await
        .unwrap_err();
    let body = err.to_response();
    assert_eq!(body.code, 422);
    let fields: Vec<_> = body
        .fields
        .unwrap()
        .into_iter()
        .map(|f| f.field)
        .collect();
    assert!(fields.contains(&"first_name".to_string()));
    assert!(fields.contains(&"last_name".to_string()));
}
