use std::collections::HashMap;

use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::db::Repositories;
use crate::handlers::league_error_response;
use crate::league::LeagueError;
use crate::models::game::{GameOwner, GameWithOwner};

/// GET /api/games - Raw game list with each game's owner attached
pub async fn get_games_with_users(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    let games = match repositories.games.get_all().await {
        Ok(games) => games,
        Err(e) => return Ok(league_error_response(&LeagueError::from(e))),
    };

    let mut owners: HashMap<Uuid, Option<GameOwner>> = HashMap::new();
    for user_id in games.iter().filter_map(|g| g.user_id) {
        if owners.contains_key(&user_id) {
            continue;
        }
        let owner = match repositories.users.get_by_id(user_id).await {
            Ok(user) => user.map(|u| GameOwner { id: u.id, username: u.username }),
            Err(e) => return Ok(league_error_response(&LeagueError::from(e))),
        };
        owners.insert(user_id, owner);
    }

    let response: Vec<GameWithOwner> = games
        .into_iter()
        .map(|game| {
            let owner = game.user_id.and_then(|id| owners.get(&id).cloned().flatten());
            GameWithOwner { game, owner }
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/teams
pub async fn get_teams(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    match repositories.teams.get_all().await {
        Ok(teams) => Ok(HttpResponse::Ok().json(teams)),
        Err(e) => Ok(league_error_response(&LeagueError::from(e))),
    }
}
