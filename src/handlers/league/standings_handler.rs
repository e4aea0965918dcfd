use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::config::settings::StandingsSettings;
use crate::db::Repositories;
use crate::handlers::league_error_response;
use crate::league::{LeagueError, StandingsService, TeamStatistics};
use crate::models::common::ApiResponse;

/// Table row as rendered to clients.
#[derive(Debug, Serialize)]
pub struct StandingEntry {
    pub position: usize,
    #[serde(flatten)]
    pub stats: TeamStatistics,
    pub goal_difference: i64,
}

/// Get the league table, recomputed from every game.
#[tracing::instrument(name = "Get league standings", skip(repositories, settings))]
pub async fn get_standings(
    repositories: web::Data<Repositories>,
    settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    let service = StandingsService::new(repositories.games.clone(), settings.unplayed_scores);

    match service.get_standings().await {
        Ok(standings) => {
            let table: Vec<StandingEntry> = standings
                .into_iter()
                .enumerate()
                .map(|(index, stats)| StandingEntry {
                    position: index + 1,
                    goal_difference: stats.goal_difference(),
                    stats,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::data(table)))
        }
        Err(e) => Ok(league_error_response(&LeagueError::from(e))),
    }
}
