pub mod ai;
pub mod auth;
pub mod index;
pub mod tasks;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Route table for the whole service.
///
/// `/api/auth` and `/api/ai` are public. Only `/api/tasks` is wrapped by the
/// session guard, so every handler in that scope can rely on `AuthenticatedUserId`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index::index)
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .service(auth::register)
                        .service(auth::login)
                        .service(auth::logout),
                )
                .service(
                    web::scope("/ai")
                        .service(ai::suggest)
                        .service(ai::describe),
                )
                .service(
                    web::scope("/tasks")
                        .wrap(AuthMiddleware)
                        .service(tasks::list_tasks)
                        .service(tasks::create_task)
                        .service(tasks::update_task)
                        .service(tasks::delete_task),
                ),
        );
}

/// JSON extractor settings: any body is parsed regardless of content type, and
/// parse failures become `400 {"error": ...}` like every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid JSON body: {}", err)).into())
}

/// Fallback for unmatched routes: plain-text `404 Not Found`.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    log::debug!("No route for {} {}", req.method(), req.path());
    Err(AppError::NotFound(req.path().to_string()))
}
