pub mod error;
pub mod games;
pub mod match_mutation;
pub mod standings;
pub mod teams;

pub use error::LeagueError;
pub use games::GameService;
pub use match_mutation::MatchMutationService;
pub use standings::{calculate_standings, StandingsService, TeamStatistics, UnplayedScorePolicy};
pub use teams::TeamService;
