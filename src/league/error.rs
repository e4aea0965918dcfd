use std::fmt;

/// Failures surfaced by the league services. Each maps to a distinct HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i32 },

    #[error("{entity} {id} was modified by another request")]
    ConcurrencyConflict { entity: Entity, id: i32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Game,
    Team,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Game => write!(f, "Game"),
            Entity::Team => write!(f, "Team"),
        }
    }
}

impl LeagueError {
    pub fn game_not_found(id: i32) -> Self {
        LeagueError::NotFound { entity: Entity::Game, id }
    }

    pub fn team_not_found(id: i32) -> Self {
        LeagueError::NotFound { entity: Entity::Team, id }
    }
}
