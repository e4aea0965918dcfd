use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::db::repository::GameRepository;
use crate::models::game::Game;

pub const POINTS_PER_WIN: i32 = 3;
pub const POINTS_PER_DRAW: i32 = 1;

/// How a game with a missing score is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplayedScorePolicy {
    /// A game counts only once both scores are known.
    #[default]
    Skip,
    /// Every game counts and a missing score is read as 0.
    CountAsZero,
}

/// One row of the league table. Built fresh by every aggregation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team_name: String,
    pub total_games: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    /// Goal totals are `i64`: summed `i32` scores cannot overflow.
    pub goals_for: i64,
    pub goals_against: i64,
    pub points: i32,
}

impl TeamStatistics {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            total_games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for - self.goals_against
    }

    /// Points recomputed from the win/draw tallies.
    pub fn derived_points(&self) -> i32 {
        POINTS_PER_WIN * self.wins + POINTS_PER_DRAW * self.draws
    }

    fn record_result(&mut self, scored: i32, conceded: i32) {
        self.total_games += 1;
        self.goals_for += i64::from(scored);
        self.goals_against += i64::from(conceded);

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.wins += 1;
                self.points += POINTS_PER_WIN;
            }
            Ordering::Less => self.losses += 1,
            Ordering::Equal => {
                self.draws += 1;
                self.points += POINTS_PER_DRAW;
            }
        }
    }
}

/// Build the league table from every game.
///
/// Teams are keyed by the exact name stored on the game; a name with no `Team`
/// row still gets an entry. The result is ordered by points, then goal
/// difference, then goals scored (all descending), then team name.
pub fn calculate_standings(games: &[Game], policy: UnplayedScorePolicy) -> Vec<TeamStatistics> {
    let mut table: HashMap<&str, TeamStatistics> = HashMap::new();

    for game in games {
        table
            .entry(game.home_team.as_str())
            .or_insert_with(|| TeamStatistics::new(&game.home_team));
        table
            .entry(game.away_team.as_str())
            .or_insert_with(|| TeamStatistics::new(&game.away_team));

        let (home_score, away_score) = match (policy, game.home_score, game.away_score) {
            (_, Some(home), Some(away)) => (home, away),
            (UnplayedScorePolicy::CountAsZero, home, away) => (home.unwrap_or(0), away.unwrap_or(0)),
            (UnplayedScorePolicy::Skip, _, _) => continue,
        };

        if let Some(home) = table.get_mut(game.home_team.as_str()) {
            home.record_result(home_score, away_score);
        }
        if let Some(away) = table.get_mut(game.away_team.as_str()) {
            away.record_result(away_score, home_score);
        }
    }

    let mut standings: Vec<TeamStatistics> = table.into_values().collect();
    standings.sort_by(compare_rows);
    standings
}

fn compare_rows(a: &TeamStatistics, b: &TeamStatistics) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_name.cmp(&b.team_name))
}

/// Reads every game from the store and aggregates it on each call.
pub struct StandingsService {
    games: Arc<dyn GameRepository>,
    policy: UnplayedScorePolicy,
}

impl StandingsService {
    pub fn new(games: Arc<dyn GameRepository>, policy: UnplayedScorePolicy) -> Self {
        Self { games, policy }
    }

    pub async fn get_standings(&self) -> Result<Vec<TeamStatistics>, sqlx::Error> {
        let games = self.games.get_all().await?;
        let standings = calculate_standings(&games, self.policy);

        tracing::info!(
            "Calculated standings for {} teams from {} games ({:?})",
            standings.len(),
            games.len(),
            self.policy
        );

        Ok(standings)
    }
}
