use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::repository::{GameRepository, SaveOutcome};
use crate::models::game::{CardState, Game, NewGame};

const GAME_COLUMNS: &str = r#"
    id, scheduled_at, home_team, away_team, home_score, away_score,
    home_card, away_card, user_id, version, created_at, updated_at
"#;

/// Row shape of the `games` table; card columns are plain strings.
#[derive(Debug, FromRow)]
struct GameRow {
    id: i32,
    scheduled_at: DateTime<Utc>,
    home_team: String,
    away_team: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
    home_card: Option<String>,
    away_card: Option<String>,
    user_id: Option<Uuid>,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GameRow> for Game {
    fn from(row: GameRow) -> Self {
        Game {
            id: row.id,
            scheduled_at: row.scheduled_at,
            home_team: row.home_team,
            away_team: row.away_team,
            home_score: row.home_score,
            away_score: row.away_score,
            home_card: row.home_card.as_deref().and_then(CardState::from_db),
            away_card: row.away_card.as_deref().and_then(CardState::from_db),
            user_id: row.user_id,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn card_column(card: Option<CardState>) -> Option<&'static str> {
    card.map(|c| c.as_str())
}

/// Postgres-backed game store
#[derive(Debug, Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgGameRepository {
    async fn get_all(&self) -> Result<Vec<Game>, sqlx::Error> {
        let rows = sqlx::query_as::<_, GameRow>(&format!(
            "SELECT {} FROM games ORDER BY scheduled_at ASC, id ASC",
            GAME_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Game::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Game>, sqlx::Error> {
        let row = sqlx::query_as::<_, GameRow>(&format!(
            "SELECT {} FROM games WHERE id = $1",
            GAME_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Game::from))
    }

    async fn create(&self, game: NewGame) -> Result<Game, sqlx::Error> {
        let row = sqlx::query_as::<_, GameRow>(&format!(
            r#"
            INSERT INTO games (
                scheduled_at, home_team, away_team, home_score, away_score,
                home_card, away_card, user_id, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, NOW(), NOW())
            RETURNING {}
            "#,
            GAME_COLUMNS
        ))
        .bind(game.scheduled_at)
        .bind(&game.home_team)
        .bind(&game.away_team)
        .bind(game.home_score)
        .bind(game.away_score)
        .bind(card_column(game.home_card))
        .bind(card_column(game.away_card))
        .bind(game.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert game: {:?}", e);
            e
        })?;

        Ok(row.into())
    }

    async fn save(&self, game: &Game, expected_version: i32) -> Result<SaveOutcome<Game>, sqlx::Error> {
        // Version check and write happen in one statement
        let row = sqlx::query_as::<_, GameRow>(&format!(
            r#"
            UPDATE games
            SET
                scheduled_at = $3,
                home_team = $4,
                away_team = $5,
                home_score = $6,
                away_score = $7,
                home_card = $8,
                away_card = $9,
                user_id = $10,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING {}
            "#,
            GAME_COLUMNS
        ))
        .bind(game.id)
        .bind(expected_version)
        .bind(game.scheduled_at)
        .bind(&game.home_team)
        .bind(&game.away_team)
        .bind(game.home_score)
        .bind(game.away_score)
        .bind(card_column(game.home_card))
        .bind(card_column(game.away_card))
        .bind(game.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match row {
            Some(row) => SaveOutcome::Saved(row.into()),
            None => SaveOutcome::Conflict,
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM games WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
