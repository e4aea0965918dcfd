// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::Repositories;
use crate::models::user::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, repositories, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    repositories: web::Data<Repositories>,
    jwt_settings: web::Data<JwtSettings>
) -> HttpResponse {
    let user = match repositories.users.get_by_username(login_form.username.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return HttpResponse::Unauthorized().finish();
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    if !verify_password(login_form.password.expose_secret(), &user.password_hash) {
        tracing::info!("Invalid password");
        return HttpResponse::Unauthorized().finish();
    }

    match generate_token(&user, &jwt_settings) {
        Ok(token) => HttpResponse::Ok().json(LoginResponse { token }),
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
