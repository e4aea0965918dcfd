use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod auth;
pub mod config;
pub mod db;
mod handlers;
pub mod league;
mod middleware;
pub mod models;
mod routes;
pub mod telemetry;
pub mod utils;
use crate::routes::init_routes;
use crate::config::jwt::JwtSettings;
use crate::config::settings::{PasswordSettings, StandingsSettings};
use crate::db::Repositories;

pub fn run(
    listener: TcpListener,
    repositories: Repositories,
    jwt_settings: JwtSettings,
    password_settings: PasswordSettings,
    standings_settings: StandingsSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let repositories = web::Data::new(repositories);
    let jwt_settings = web::Data::new(jwt_settings);
    let password_settings = web::Data::new(password_settings);
    let standings_settings = web::Data::new(standings_settings);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:3001")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(repositories.clone())
            .app_data(jwt_settings.clone())
            .app_data(password_settings.clone())
            .app_data(standings_settings.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
