use actix_web::{post, web, HttpResponse};

use crate::config::settings::PasswordSettings;
use crate::db::Repositories;
use crate::handlers::registration_handler::register_user;
use crate::models::user::RegistrationRequest;

#[post("/register_user")]
async fn register(
    user_form: web::Json<RegistrationRequest>,
    repositories: web::Data<Repositories>,
    password_settings: web::Data<PasswordSettings>,
) -> HttpResponse {
    register_user(user_form, repositories, password_settings).await
}
