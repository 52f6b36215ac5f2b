use crate::{error::AppError, state::AppState};
use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestion: String,
}

#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    #[serde(default)]
    pub title: String,
    /// Target language name, e.g. "French". Blank means English.
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub description: String,
}

/// Live tag preview for a description being typed. No session required.
#[post("/suggest")]
pub async fn suggest(
    state: web::Data<AppState>,
    body: web::Json<SuggestRequest>,
) -> Result<impl Responder, AppError> {
    let suggestion = state.ai.suggest_tag(&body.description).await?;
    log::debug!("Suggested tag {:?}", suggestion);
    Ok(HttpResponse::Ok().json(SuggestResponse { suggestion }))
}

/// Generated multi-paragraph description for a task title. No session required.
#[post("/describe")]
pub async fn describe(
    state: web::Data<AppState>,
    body: web::Json<DescribeRequest>,
) -> Result<impl Responder, AppError> {
    let description = state
        .ai
        .generate_description(&body.title, &body.language)
        .await?;
    log::debug!("Generated {}-char description", description.chars().count());
    Ok(HttpResponse::Ok().json(DescribeResponse { description }))
}
