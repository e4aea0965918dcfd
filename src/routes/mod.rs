use actix_web::web;

pub mod admin;
pub mod api;
pub mod auth;
pub mod backend_health;
pub mod league;
pub mod registration;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(registration::register)
        .service(backend_health::backend_health)
        .service(auth::login);

    // League routes (require authentication)
    cfg.service(
        web::scope("/league")
            .wrap(AuthMiddleware)
            .service(league::get_standings)
            .service(league::get_games)
            .service(league::get_game)
            .service(league::get_teams)
            .service(league::get_team)
    );
    // Raw JSON API (require authentication)
    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(api::get_games)
            .service(api::get_teams)
    );

    admin::init_admin_routes(cfg);
}
