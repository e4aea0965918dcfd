use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::repository::{GameRepository, SaveOutcome, TeamRepository, UserRepository};
use crate::models::game::{Game, NewGame};
use crate::models::team::{Team, TeamFields};
use crate::models::user::{User, UserRole};

/// Process-local store with the same version semantics as the Postgres tables.
#[derive(Default)]
pub struct InMemoryStore {
    games: RwLock<Table<Game>>,
    teams: RwLock<Table<Team>>,
    users: RwLock<HashMap<Uuid, User>>,
}

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: BTreeMap::new(), next_id: 1 }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Raised where Postgres would report SQLSTATE 23505.
#[derive(Debug)]
pub struct UniqueViolation {
    constraint: &'static str,
}

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate key value violates unique constraint \"{}\"", self.constraint)
    }
}

impl std::error::Error for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23505"))
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn unique_violation(constraint: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(UniqueViolation { constraint }))
}

#[async_trait]
impl GameRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Game>, sqlx::Error> {
        let games = self.games.read().await;
        let mut all: Vec<Game> = games.rows.values().cloned().collect();
        all.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Game>, sqlx::Error> {
        Ok(self.games.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, game: NewGame) -> Result<Game, sqlx::Error> {
        let mut games = self.games.write().await;
        let now = Utc::now();
        let created = Game {
            id: games.allocate_id(),
            scheduled_at: game.scheduled_at,
            home_team: game.home_team,
            away_team: game.away_team,
            home_score: game.home_score,
            away_score: game.away_score,
            home_card: game.home_card,
            away_card: game.away_card,
            user_id: game.user_id,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        games.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn save(&self, game: &Game, expected_version: i32) -> Result<SaveOutcome<Game>, sqlx::Error> {
        let mut games = self.games.write().await;
        let Some(stored) = games.rows.get_mut(&game.id) else {
            return Ok(SaveOutcome::Conflict);
        };
        if stored.version != expected_version {
            return Ok(SaveOutcome::Conflict);
        }

        let mut updated = game.clone();
        updated.version = stored.version + 1;
        updated.created_at = stored.created_at;
        updated.updated_at = Utc::now();
        *stored = updated.clone();
        Ok(SaveOutcome::Saved(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.games.write().await.rows.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.games.read().await.rows.contains_key(&id))
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Team>, sqlx::Error> {
        let teams = self.teams.read().await;
        let mut all: Vec<Team> = teams.rows.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Team>, sqlx::Error> {
        Ok(self.teams.read().await.rows.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Team>, sqlx::Error> {
        let teams = self.teams.read().await;
        Ok(teams.rows.values().find(|t| t.name == name).cloned())
    }

    async fn create(&self, fields: TeamFields) -> Result<Team, sqlx::Error> {
        let mut teams = self.teams.write().await;
        let now = Utc::now();
        let team = Team {
            id: teams.allocate_id(),
            name: fields.name,
            founded: fields.founded,
            country: fields.country,
            city: fields.city,
            stadium: fields.stadium,
            emblem: fields.emblem,
            user_id: fields.user_id,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        teams.rows.insert(team.id, team.clone());
        Ok(team)
    }

    async fn save(&self, id: i32, fields: TeamFields, expected_version: i32) -> Result<SaveOutcome<Team>, sqlx::Error> {
        let mut teams = self.teams.write().await;
        let Some(stored) = teams.rows.get_mut(&id) else {
            return Ok(SaveOutcome::Conflict);
        };
        if stored.version != expected_version {
            return Ok(SaveOutcome::Conflict);
        }

        stored.name = fields.name;
        stored.founded = fields.founded;
        stored.country = fields.country;
        stored.city = fields.city;
        stored.stadium = fields.stadium;
        stored.emblem = fields.emblem;
        stored.user_id = fields.user_id;
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(SaveOutcome::Saved(stored.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.teams.write().await.rows.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> Result<bool, sqlx::Error> {
        Ok(self.teams.read().await.rows.contains_key(&id))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: User) -> Result<(), sqlx::Error> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(unique_violation("users_username_key"));
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<bool, sqlx::Error> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
