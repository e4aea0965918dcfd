//! Runs against a real Postgres server; `cargo test -- --ignored` with the
//! database from `configuration/` reachable.
use chrono::{TimeZone, Utc};
use secrecy::ExposeSecret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use liga_backend::config::settings::{get_config, DatabaseSettings};
use liga_backend::db::{Repositories, SaveOutcome};
use liga_backend::models::game::{CardState, NewGame};

async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

async fn repositories() -> Repositories {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    Repositories::postgres(configure_db(&configuration.database).await)
}

#[tokio::test]
#[ignore]
async fn postgres_save_rejects_stale_versions() {
    let repositories = repositories().await;

    let game = repositories
        .games
        .create(NewGame {
            scheduled_at: Utc.with_ymd_and_hms(2024, 5, 18, 17, 0, 0).unwrap(),
            home_team: "Benfica".into(),
            away_team: "Porto".into(),
            home_score: None,
            away_score: None,
            home_card: None,
            away_card: None,
            user_id: None,
        })
        .await
        .expect("Failed to create game");
    assert_eq!(game.version, 1);

    let mut edited = game.clone();
    edited.home_card = Some(CardState::Red);
    let saved = match repositories.games.save(&edited, game.version).await.unwrap() {
        SaveOutcome::Saved(saved) => saved,
        SaveOutcome::Conflict => panic!("First save should succeed"),
    };
    assert_eq!(saved.version, 2);
    assert_eq!(saved.home_card, Some(CardState::Red));
    assert_eq!(saved.away_card, None);

    let stale = repositories.games.save(&edited, game.version).await.unwrap();
    assert!(matches!(stale, SaveOutcome::Conflict));
}

#[tokio::test]
#[ignore]
async fn postgres_delete_reports_missing_rows() {
    let repositories = repositories().await;

    assert!(!repositories.games.delete(12345).await.unwrap());
    assert!(!repositories.games.exists(12345).await.unwrap());
    assert!(repositories.teams.get_by_name("Nobody").await.unwrap().is_none());
}
