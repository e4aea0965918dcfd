use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::config::settings::PasswordSettings;
use crate::db::repository::is_unique_violation;
use crate::db::Repositories;
use crate::models::common::ApiResponse;
use crate::models::user::{RegistrationRequest, User, UserRole};
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, repositories, password_settings),
    fields(
        username = %user_form.username,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    repositories: web::Data<Repositories>,
    password_settings: web::Data<PasswordSettings>,
) -> HttpResponse {
    if let Err(message) = user_form.validate() {
        return HttpResponse::BadRequest().json(ApiResponse::error(message));
    }

    let username = user_form.username.trim().to_string();
    match repositories.users.get_by_username(&username).await {
        Ok(Some(_)) => {
            tracing::info!("Username already taken");
            return HttpResponse::Conflict().json(ApiResponse::error("Username already taken"));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    }

    let password_hash = match hash_password(user_form.password.expose_secret(), password_settings.hash_cost) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    let user = User {
        id: Uuid::new_v4(),
        email: user_form.email.trim().to_string(),
        username,
        password_hash,
        role: UserRole::User,
        created_at: Utc::now(),
    };
    let user_id = user.id;

    match repositories.users.create(user).await {
        Ok(()) => {
            tracing::info!("Registered user {}", user_id);
            HttpResponse::Ok().json(ApiResponse::success(
                "User registered",
                serde_json::json!({ "id": user_id }),
            ))
        }
        // Lost a race with a concurrent registration of the same name
        Err(e) if is_unique_violation(&e) => {
            tracing::info!("Username already taken");
            HttpResponse::Conflict().json(ApiResponse::error("Username already taken"))
        }
        Err(e) => {
            tracing::error!("Failed to insert user: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
