use actix_web::HttpResponse;

use crate::league::LeagueError;
use crate::models::common::ApiResponse;

pub mod admin;
pub mod api;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod league;
pub mod registration_handler;

/// Map a service failure to the status and JSON body the client sees.
pub fn league_error_response(error: &LeagueError) -> HttpResponse {
    match error {
        LeagueError::NotFound { .. } => {
            HttpResponse::NotFound().json(ApiResponse::error(error.to_string()))
        }
        LeagueError::ConcurrencyConflict { .. } => {
            HttpResponse::Conflict().json(ApiResponse::error(format!(
                "{}. Reload it and try again.",
                error
            )))
        }
        LeagueError::Validation(message) => {
            HttpResponse::BadRequest().json(ApiResponse::error(message.clone()))
        }
        LeagueError::Database(e) => {
            tracing::error!("Database error: {:?}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error("Database error"))
        }
    }
}
