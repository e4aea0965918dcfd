use actix_web::{web, HttpResponse, Result};

use crate::db::Repositories;
use crate::handlers::league_error_response;
use crate::league::{GameService, MatchMutationService};
use crate::models::common::ApiResponse;
use crate::models::game::{GameEditRequest, IssueCardRequest, NewGame, ScoreUpdateRequest};
use crate::models::user::Claims;

fn game_service(repositories: &Repositories) -> GameService {
    GameService::new(repositories.games.clone(), repositories.teams.clone())
}

// GET /admin/games - List games ordered by date
pub async fn get_games(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    match game_service(&repositories).list().await {
        Ok(games) => Ok(HttpResponse::Ok().json(ApiResponse::data(games))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// GET /admin/games/{id}
pub async fn get_game_by_id(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    match game_service(&repositories).get(path.into_inner()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::data(game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// GET /admin/games/team-names - Names offered when scheduling a game
pub async fn get_team_names(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    match game_service(&repositories).team_name_suggestions().await {
        Ok(names) => Ok(HttpResponse::Ok().json(ApiResponse::data(names))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// POST /admin/games - Schedule a game
#[tracing::instrument(
    name = "Create game",
    skip(body, repositories, claims),
    fields(
        home_team = %body.home_team,
        away_team = %body.away_team,
        admin_user = %claims.username
    )
)]
pub async fn create_game(
    repositories: web::Data<Repositories>,
    body: web::Json<NewGame>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    match game_service(&repositories).create(body.into_inner(), claims.user_id()).await {
        Ok(game) => Ok(HttpResponse::Created().json(ApiResponse::success("Game created successfully", game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// PUT /admin/games/{id} - Replace every editable field
#[tracing::instrument(
    name = "Update game",
    skip(body, repositories, claims),
    fields(
        game_id = %path,
        admin_user = %claims.username
    )
)]
pub async fn update_game(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
    body: web::Json<GameEditRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let service = MatchMutationService::new(repositories.games.clone());

    match service.edit_game(path.into_inner(), body.into_inner(), claims.user_id()).await {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::success("Game updated successfully", game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// PUT /admin/games/{id}/score - Record or clear the result
#[tracing::instrument(
    name = "Update game score",
    skip(body, repositories, claims),
    fields(
        game_id = %path,
        home_score = ?body.home_score,
        away_score = ?body.away_score,
        admin_user = %claims.username
    )
)]
pub async fn update_score(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
    body: web::Json<ScoreUpdateRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let service = MatchMutationService::new(repositories.games.clone());
    let request = body.into_inner();

    match service
        .update_score(path.into_inner(), request.home_score, request.away_score, request.version)
        .await
    {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::success("Score updated successfully", game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// POST /admin/cards - Issue a card to one side of a game
#[tracing::instrument(
    name = "Issue card",
    skip(body, repositories, claims),
    fields(
        game_id = %body.match_id,
        side = ?body.side,
        card = ?body.card_type,
        admin_user = %claims.username
    )
)]
pub async fn issue_card(
    repositories: web::Data<Repositories>,
    body: web::Json<IssueCardRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let service = MatchMutationService::new(repositories.games.clone());
    let request = body.into_inner();

    match service
        .issue_card(request.match_id, request.side, request.card_type, request.version)
        .await
    {
        Ok(game) => Ok(HttpResponse::Ok().json(ApiResponse::success("Card issued successfully", game))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// DELETE /admin/games/{id}
#[tracing::instrument(
    name = "Delete game",
    skip(repositories, claims),
    fields(
        game_id = %path,
        admin_user = %claims.username
    )
)]
pub async fn delete_game(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let game_id = path.into_inner();

    match game_service(&repositories).delete(game_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Game deleted successfully",
            serde_json::json!({ "id": game_id }),
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}
