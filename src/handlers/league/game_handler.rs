use actix_web::{web, HttpResponse, Result};

use crate::db::Repositories;
use crate::handlers::league_error_response;
use crate::league::{GameService, TeamService};
use crate::models::common::ApiResponse;

/// List games ordered by date
pub async fn get_games(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    let service = GameService::new(repositories.games.clone(), repositories.teams.clone());

    match service.list().await {
        Ok(games) => Ok(HttpResponse::Ok().json(ApiResponse::data(games))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Get game details
pub async fn get_game(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let service = GameService::new(repositories.games.clone(), repositories.teams.clone());

    match service.get(path.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::data(game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// List teams ordered by name
pub async fn get_teams(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.list().await {
        Ok(teams) => Ok(HttpResponse::Ok().json(ApiResponse::data(teams))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Get team details
pub async fn get_team(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.get(path.into_inner()).await {
        Ok(team) => Ok(HttpResponse::Ok().json(ApiResponse::data(team))),
        Err(e) => Ok(league_error_response(&e)),
    }
}
