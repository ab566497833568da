mod common;

use axum::http::StatusCode;
use common::{TestClient, assert_redirect, body_text};
use sea_orm::EntityTrait;
use watchlist::entities::users;

#[tokio::test]
async fn test_login_success() {
    let mut client = TestClient::new().await;

    let html = body_text(client.get("/login").await).await;
    assert!(html.contains("action=\"/login\""));

    client.login().await;

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Login success."));
    assert!(html.contains("href=\"/logout\""));
    assert!(html.contains("href=\"/settings\""));
}

#[tokio::test]
async fn test_login_with_wrong_password_stays_anonymous() {
    let mut client = TestClient::new().await;

    let response = client
        .post_form("/login", "username=admin&password=wrong")
        .await;
    assert_redirect(&response, "/login");

    let html = body_text(client.get("/login").await).await;
    assert!(html.contains("Invalid username or password."));

    assert_redirect(&client.get("/settings").await, "/login");
}

#[tokio::test]
async fn test_login_with_missing_field_is_invalid_input() {
    let mut client = TestClient::new().await;

    let response = client.post_form("/login", "username=&password=password").await;
    assert_redirect(&response, "/login");

    let html = body_text(client.get("/login").await).await;
    assert!(html.contains("Invalid input."));
}

#[tokio::test]
async fn test_login_without_any_user() {
    let mut client = TestClient::new().await;
    users::Entity::delete_many()
        .exec(&client.state.store().conn)
        .await
        .unwrap();

    let response = client
        .post_form("/login", "username=admin&password=password")
        .await;
    assert_redirect(&response, "/login");

    let html = body_text(client.get("/login").await).await;
    assert!(html.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_logout() {
    let mut client = TestClient::new().await;
    client.login().await;

    assert_redirect(&client.get("/logout").await, "/");

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Goodbye."));
    assert!(html.contains("href=\"/login\""));

    assert_redirect(&client.get("/logout").await, "/login");
}

#[tokio::test]
async fn test_settings_updates_display_name() {
    let mut client = TestClient::new().await;
    client.login().await;

    let response = client.get("/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("value=\"Admin\""));

    let response = client.post_form("/settings", "name=Grey").await;
    assert_redirect(&response, "/");

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Setting updated."));
    assert!(html.contains("Grey"));

    let owner = client.state.store().get_first_user().await.unwrap().unwrap();
    assert_eq!(owner.name, "Grey");
}

#[tokio::test]
async fn test_settings_rejects_long_name() {
    let mut client = TestClient::new().await;
    client.login().await;

    let response = client
        .post_form("/settings", &format!("name={}", "a".repeat(21)))
        .await;
    assert_redirect(&response, "/settings");

    let html = body_text(client.get("/settings").await).await;
    assert!(html.contains("Invalid input."));

    let owner = client.state.store().get_first_user().await.unwrap().unwrap();
    assert_eq!(owner.name, "Admin");
}

#[tokio::test]
async fn test_deleted_user_is_logged_out() {
    let mut client = TestClient::new().await;
    client.login().await;

    let owner = client.state.store().get_first_user().await.unwrap().unwrap();
    users::Entity::delete_by_id(owner.id)
        .exec(&client.state.store().conn)
        .await
        .unwrap();

    assert_redirect(&client.get("/settings").await, "/login");

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("href=\"/login\""));
    assert!(!html.contains("href=\"/logout\""));
}

#[tokio::test]
async fn test_anonymous_settings_post_redirects_without_change() {
    let mut client = TestClient::new().await;

    let response = client.post_form("/settings", "name=Hacker").await;
    assert_redirect(&response, "/login");

    let owner = client.state.store().get_first_user().await.unwrap().unwrap();
    assert_eq!(owner.name, "Admin");
}
