use actix_web::{get, web, HttpResponse, Result};

use crate::db::Repositories;
use crate::handlers::api::games_handler;

#[get("/games")]
async fn get_games(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    games_handler::get_games_with_users(repositories).await
}

#[get("/teams")]
async fn get_teams(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    games_handler::get_teams(repositories).await
}
