use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::config::jwt::JwtSettings;
use crate::models::user::{Claims, User};

/// Issue an HS256 session token for `user`.
pub fn generate_token(user: &User, settings: &JwtSettings) -> Result<String, jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + settings.token_lifetime();

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role,
        exp: expires_at.timestamp() as usize,
    };

    encode(&Header::new(Algorithm::HS256), &claims, &settings.encoding_key())
}

pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &settings.decoding_key(),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(token_data.claims)
}
