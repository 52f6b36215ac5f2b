use crate::{
    auth::{hash_password, token::redact, Credentials, LoginResponse, Session},
    error::AppError,
    state::AppState,
};
use actix_web::{http::header, post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

/// Register a new user
///
/// Stores the email with the digest of the password. A second registration for the
/// same email fails with `409 Conflict`.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let password_hash = hash_password(&credentials.password);
    let user = state
        .users
        .create_user(&credentials.email, &password_hash)
        .await?;

    log::info!("Registered user {}", user.id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Registered" })))
}

/// Login user
///
/// Looks the user up by email and password digest together and, on a match, opens
/// a new session. Earlier sessions for the same user stay valid.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let password_hash = hash_password(&credentials.password);
    let user = state
        .users
        .find_by_credentials(&credentials.email, &password_hash)
        .await?
        .ok_or_else(|| {
            log::warn!("Failed login attempt");
            AppError::Unauthorized("Invalid credentials".into())
        })?;

    let session = Session::new(user.id, state.session_ttl_secs);
    state.sessions.create_session(&session).await?;

    log::info!(
        "Opened session {} for user {} until {}",
        redact(&session.token),
        user.id,
        session.expires_at
    );
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: session.token,
    }))
}

/// Logout user
///
/// Drops the session named by the `Authorization` header. A missing or unknown
/// token is not an error.
#[post("/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());

    if let Some(token) = token {
        let removed = state.sessions.delete_session(token).await?;
        log::info!("Logout for session {} removed {} entries", redact(token), removed);
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Logged out" })))
}
