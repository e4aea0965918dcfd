use actix_web::web;

use crate::handlers::admin::{
    game_management_handler,
    team_handler,
};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Team management routes
            .service(
                web::resource("/teams")
                    .route(web::get().to(team_handler::get_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            .service(
                web::resource("/teams/{id}")
                    .route(web::get().to(team_handler::get_team_by_id))
                    .route(web::put().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team))
            )

            // Game management routes
            .service(
                web::resource("/games")
                    .route(web::get().to(game_management_handler::get_games))
                    .route(web::post().to(game_management_handler::create_game))
            )
            // Registered before /games/{id} so the literal segment wins
            .service(
                web::resource("/games/team-names")
                    .route(web::get().to(game_management_handler::get_team_names))
            )
            .service(
                web::resource("/games/{id}")
                    .route(web::get().to(game_management_handler::get_game_by_id))
                    .route(web::put().to(game_management_handler::update_game))
                    .route(web::delete().to(game_management_handler::delete_game))
            )
            .service(
                web::resource("/games/{id}/score")
                    .route(web::put().to(game_management_handler::update_score))
            )
            .service(
                web::resource("/cards")
                    .route(web::post().to(game_management_handler::issue_card))
            )
    );
}
