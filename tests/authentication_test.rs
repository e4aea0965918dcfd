use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::{create_admin_user_and_login, create_user_and_login, login, make_authenticated_request, spawn_app};

#[tokio::test]
async fn register_and_login_returns_a_token() {
    let test_app = spawn_app().await;

    let user = create_user_and_login(&test_app.address).await;

    assert!(!user.token.is_empty());
}

#[tokio::test]
async fn registration_rejects_invalid_data() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let test_cases = vec![
        (json!({"username": "ab", "password": "password123", "email": "ab@example.com"}), "short username"),
        (json!({"username": "validname", "password": "password123", "email": "not-an-email"}), "invalid email"),
    ];

    for (body, description) in test_cases {
        let response = client
            .post(&format!("{}/register_user", test_app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(400, response.status().as_u16(), "Expected 400 for {}", description);
    }
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let body = json!({"username": "duplicate", "password": "password123", "email": "dup@example.com"});

    let first = client
        .post(&format!("{}/register_user", test_app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");
    let second = client
        .post(&format!("{}/register_user", test_app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, first.status().as_u16());
    assert_eq!(409, second.status().as_u16());
}

#[tokio::test]
async fn concurrent_registrations_of_one_name_yield_one_conflict() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let url = format!("{}/register_user", test_app.address);
    let body = json!({"username": "racer", "password": "password123", "email": "racer@example.com"});

    let (first, second) = tokio::join!(
        client.post(&url).json(&body).send(),
        client.post(&url).json(&body).send(),
    );

    let mut statuses = vec![
        first.expect("Failed to execute request.").status().as_u16(),
        second.expect("Failed to execute request.").status().as_u16(),
    ];
    statuses.sort();
    assert_eq!(statuses, vec![200, 409]);
}

#[tokio::test]
async fn username_is_trimmed_on_register_and_login() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let registered = client
        .post(&format!("{}/register_user", test_app.address))
        .json(&json!({"username": " bob ", "password": "password123", "email": "bob@example.com"}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, registered.status().as_u16());

    for username in [" bob ", "bob"] {
        let token = login(&client, &test_app.address, username, "password123").await;
        assert!(!token.is_empty());
    }
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let user = create_user_and_login(&test_app.address).await;

    let unknown_user = client
        .post(&format!("{}/login", test_app.address))
        .json(&json!({"username": "nobody", "password": "password123"}))
        .send()
        .await
        .expect("Failed to execute request.");
    let wrong_password = client
        .post(&format!("{}/login", test_app.address))
        .json(&json!({"username": user.username, "password": "wrong-password"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, unknown_user.status().as_u16());
    assert_eq!(401, wrong_password.status().as_u16());
}

#[tokio::test]
async fn protected_routes_reject_missing_or_invalid_tokens() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let missing = client
        .get(&format!("{}/league/games", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    let invalid = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/api/games", test_app.address),
        "not-a-token",
        None,
    ).await;

    assert_eq!(401, missing.status().as_u16());
    assert_eq!(401, invalid.status().as_u16());
}

#[tokio::test]
async fn admin_routes_require_the_admin_role() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let user = create_user_and_login(&test_app.address).await;
    let admin = create_admin_user_and_login(&test_app).await;

    let as_user = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/admin/games", test_app.address),
        &user.token,
        None,
    ).await;
    let as_admin = make_authenticated_request(
        &client,
        reqwest::Method::GET,
        &format!("{}/admin/games", test_app.address),
        &admin.token,
        None,
    ).await;

    assert_eq!(403, as_user.status().as_u16());
    assert_eq!(200, as_admin.status().as_u16());
}
