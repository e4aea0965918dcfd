use actix_web::{web, HttpResponse, Result};

use crate::db::Repositories;
use crate::handlers::league_error_response;
use crate::league::TeamService;
use crate::models::common::ApiResponse;
use crate::models::team::{TeamEditRequest, TeamRequest};
use crate::models::user::Claims;

// GET /admin/teams - List teams ordered by name
pub async fn get_teams(
    repositories: web::Data<Repositories>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.list().await {
        Ok(teams) => Ok(HttpResponse::Ok().json(ApiResponse::data(teams))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// GET /admin/teams/{id} - Get team by ID
pub async fn get_team_by_id(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.get(path.into_inner()).await {
        Ok(team) => Ok(HttpResponse::Ok().json(ApiResponse::data(team))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// POST /admin/teams - Create new team
#[tracing::instrument(
    name = "Create team",
    skip(body, repositories, claims),
    fields(
        team_name = %body.name,
        admin_user = %claims.username
    )
)]
pub async fn create_team(
    repositories: web::Data<Repositories>,
    body: web::Json<TeamRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.create(body.into_inner(), claims.user_id()).await {
        Ok(team) => Ok(HttpResponse::Created().json(ApiResponse::success("Team created successfully", team))),
        Err(e) => {
            tracing::info!("Team not created: {}", e);
            Ok(league_error_response(&e))
        }
    }
}

// PUT /admin/teams/{id} - Replace team fields
#[tracing::instrument(
    name = "Update team",
    skip(body, repositories, claims),
    fields(
        team_id = %path,
        admin_user = %claims.username
    )
)]
pub async fn update_team(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
    body: web::Json<TeamEditRequest>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let service = TeamService::new(repositories.teams.clone());

    match service.edit(path.into_inner(), body.into_inner(), claims.user_id()).await {
        Ok(team) => Ok(HttpResponse::Ok().json(ApiResponse::success("Team updated successfully", team))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

// DELETE /admin/teams/{id} - Delete team; games keep the name
#[tracing::instrument(
    name = "Delete team",
    skip(repositories, claims),
    fields(
        team_id = %path,
        admin_user = %claims.username
    )
)]
pub async fn delete_team(
    repositories: web::Data<Repositories>,
    path: web::Path<i32>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    let service = TeamService::new(repositories.teams.clone());

    match service.delete(team_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Team deleted successfully",
            serde_json::json!({ "id": team_id }),
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}
