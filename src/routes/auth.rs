// src/routes/auth.rs
use actix_web::{post, web, HttpResponse};

use crate::config::jwt::JwtSettings;
use crate::db::Repositories;
use crate::handlers::auth_handler::login_user;
use crate::models::user::LoginRequest;

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    repositories: web::Data<Repositories>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    login_user(login_form, repositories, jwt_settings).await
}
