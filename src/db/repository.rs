//! Storage contracts consumed by the league services.
//!
//! Handlers and services only see these traits; `Repositories::postgres` backs them with
//! Postgres and `InMemoryStore` keeps everything in process for tests and demos.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::game_queries::PgGameRepository;
use crate::db::memory::InMemoryStore;
use crate::db::team_queries::PgTeamRepository;
use crate::db::user_queries::PgUserRepository;
use crate::models::game::{Game, NewGame};
use crate::models::team::{Team, TeamFields};
use crate::models::user::{User, UserRole};

/// Result of a version-checked write.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<T> {
    Saved(T),
    /// The stored version no longer matches the expected one, or the row is gone.
    Conflict,
}

#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Every game, ordered by scheduled date.
    async fn get_all(&self) -> Result<Vec<Game>, sqlx::Error>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Game>, sqlx::Error>;
    async fn create(&self, game: NewGame) -> Result<Game, sqlx::Error>;
    /// Replace the stored record if its version still equals `expected_version`.
    async fn save(&self, game: &Game, expected_version: i32) -> Result<SaveOutcome<Game>, sqlx::Error>;
    /// Returns false when nothing was deleted.
    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error>;
    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Every team, ordered by name.
    async fn get_all(&self) -> Result<Vec<Team>, sqlx::Error>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Team>, sqlx::Error>;
    /// Case-sensitive exact match.
    async fn get_by_name(&self, name: &str) -> Result<Option<Team>, sqlx::Error>;
    async fn create(&self, fields: TeamFields) -> Result<Team, sqlx::Error>;
    async fn save(&self, id: i32, fields: TeamFields, expected_version: i32) -> Result<SaveOutcome<Team>, sqlx::Error>;
    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error>;
    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error>;
    async fn create(&self, user: User) -> Result<(), sqlx::Error>;
    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<bool, sqlx::Error>;
}

/// The set of stores shared with every request through `web::Data`.
#[derive(Clone)]
pub struct Repositories {
    pub games: Arc<dyn GameRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            games: Arc::new(PgGameRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::default());
        Self {
            games: store.clone(),
            teams: store.clone(),
            users: store,
        }
    }
}

/// True for Postgres unique-constraint violations.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
