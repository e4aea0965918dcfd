// src/routes/league.rs
use actix_web::{get, web, HttpResponse, Result};

use crate::config::settings::StandingsSettings;
use crate::db::Repositories;
use crate::handlers::league::{game_handler, standings_handler};

/// Get the league table
#[get("/standings")]
async fn get_standings(
    repositories: web::Data<Repositories>,
    settings: web::Data<StandingsSettings>,
) -> Result<HttpResponse> {
    standings_handler::get_standings(repositories, settings).await
}

/// List games
#[get("/games")]
async fn get_games(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    game_handler::get_games(repositories).await
}

/// Get game by ID
#[get("/games/{game_id}")]
async fn get_game(
    path: web::Path<i32>,
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    game_handler::get_game(repositories, path).await
}

/// List teams
#[get("/teams")]
async fn get_teams(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    game_handler::get_teams(repositories).await
}

/// Get team by ID
#[get("/teams/{team_id}")]
async fn get_team(
    path: web::Path<i32>,
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    game_handler::get_team(repositories, path).await
}
