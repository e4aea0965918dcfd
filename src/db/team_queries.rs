use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::repository::{SaveOutcome, TeamRepository};
use crate::models::team::{Team, TeamFields};

/// Postgres-backed team store
#[derive(Debug, Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn get_all(&self) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    async fn create(&self, fields: TeamFields) -> Result<Team, sqlx::Error> {
        sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, founded, country, city, stadium, emblem, user_id, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 1, NOW(), NOW())
            RETURNING *
            "#
        )
        .bind(&fields.name)
        .bind(fields.founded)
        .bind(&fields.country)
        .bind(&fields.city)
        .bind(&fields.stadium)
        .bind(&fields.emblem)
        .bind(fields.user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save(&self, id: i32, fields: TeamFields, expected_version: i32) -> Result<SaveOutcome<Team>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            UPDATE teams
            SET
                name = $3,
                founded = $4,
                country = $5,
                city = $6,
                stadium = $7,
                emblem = $8,
                user_id = $9,
                version = version + 1,
                updated_at = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#
        )
        .bind(id)
        .bind(expected_version)
        .bind(&fields.name)
        .bind(fields.founded)
        .bind(&fields.country)
        .bind(&fields.city)
        .bind(&fields.stadium)
        .bind(&fields.emblem)
        .bind(fields.user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match team {
            Some(team) => SaveOutcome::Saved(team),
            None => SaveOutcome::Conflict,
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM teams WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
