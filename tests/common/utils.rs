#![allow(dead_code)]

use serde_json::json;
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use liga_backend::run;
use liga_backend::config::jwt::JwtSettings;
use liga_backend::config::settings::{PasswordSettings, StandingsSettings};
use liga_backend::db::Repositories;
use liga_backend::league::UnplayedScorePolicy;
use liga_backend::models::user::UserRole;
use liga_backend::telemetry::{get_subscriber, init_subscriber};

const PASSWORD: &str = "password123";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub repositories: Repositories,
}

pub struct UserRegLoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_policy(UnplayedScorePolicy::Skip).await
}

pub async fn spawn_app_with_policy(unplayed_scores: UnplayedScorePolicy) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let repositories = Repositories::in_memory();
    let server = run(
        listener,
        repositories.clone(),
        JwtSettings::new("test-secret".to_string(), 1),
        PasswordSettings { hash_cost: 4 },
        StandingsSettings { unplayed_scores },
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp {
        address,
        repositories,
    }
}

pub async fn create_user_and_login(app_address: &str) -> UserRegLoginResponse {
    let client = Client::new();
    let username = format!("user{}", &Uuid::new_v4().to_string()[..8]);
    let email = format!("{}@example.com", username);

    let register_response = client
        .post(&format!("{}/register_user", app_address))
        .json(&json!({
            "username": username,
            "password": PASSWORD,
            "email": email
        }))
        .send()
        .await
        .expect("Failed to register user.");
    assert_eq!(200, register_response.status().as_u16());

    let body: serde_json::Value = register_response.json().await.expect("Failed to parse register response");
    let user_id = Uuid::parse_str(body["data"]["id"].as_str().expect("No id in response"))
        .expect("Invalid user id");

    let token = login(&client, app_address, &username, PASSWORD).await;

    UserRegLoginResponse { token, user_id, username }
}

/// Registers a user, promotes it through the store, then logs in again so the
/// token carries the admin role.
pub async fn create_admin_user_and_login(test_app: &TestApp) -> UserRegLoginResponse {
    let user = create_user_and_login(&test_app.address).await;

    let promoted = test_app
        .repositories
        .users
        .set_role(user.user_id, UserRole::Admin)
        .await
        .expect("Failed to promote user to admin");
    assert!(promoted);

    let token = login(&Client::new(), &test_app.address, &user.username, PASSWORD).await;
    UserRegLoginResponse { token, ..user }
}

pub async fn login(client: &Client, app_address: &str, username: &str, password: &str) -> String {
    let login_response = client
        .post(&format!("{}/login", app_address))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.");
    assert_eq!(200, login_response.status().as_u16());

    let login_response: serde_json::Value = login_response.json().await.expect("Failed to parse login response");
    login_response["token"].as_str().expect("No token in response").to_string()
}

pub async fn make_authenticated_request(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> reqwest::Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));

    if let Some(json_body) = body {
        request = request.json(&json_body);
    }

    request.send().await.expect("Failed to execute request")
}

/// Schedules a game through the admin API and returns its JSON.
pub async fn create_game(
    client: &Client,
    test_app: &TestApp,
    token: &str,
    home_team: &str,
    away_team: &str,
    score: Option<(i32, i32)>,
) -> serde_json::Value {
    let response = make_authenticated_request(
        client,
        reqwest::Method::POST,
        &format!("{}/admin/games", test_app.address),
        token,
        Some(json!({
            "scheduled_at": "2024-09-14T18:00:00Z",
            "home_team": home_team,
            "away_team": away_team,
            "home_score": score.map(|s| s.0),
            "away_score": score.map(|s| s.1)
        })),
    ).await;
    assert_eq!(201, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"].clone()
}
