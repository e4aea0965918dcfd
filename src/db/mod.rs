pub mod game_queries;
pub mod memory;
pub mod repository;
pub mod team_queries;
pub mod user_queries;

pub use repository::{GameRepository, Repositories, SaveOutcome, TeamRepository, UserRepository};
