use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        resume_dto::{CreateResumePayload, UpdateResumePayload},
        MessageResponse,
    },
    error::Result,
    extractors::{AppJson, AppPath},
    utils::token::Identity,
    AppState,
};

#[axum::debug_handler]
pub async fn list_resumes(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.directory_service.list_resumes().await?;
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_resume(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let resume = state.directory_service.get_resume(id).await?;
    Ok(Json(resume))
}

#[axum::debug_handler]
pub async fn create_resume(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppJson(payload): AppJson<CreateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state
        .resume_service
        .create(identity.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

#[axum::debug_handler]
pub async fn update_resume(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateResumePayload>,
) -> Result<impl IntoResponse> {
    let resume = state
        .resume_service
        .update(id, identity.user_id, payload)
        .await?;
    Ok(Json(resume))
}

#[axum::debug_handler]
pub async fn delete_resume(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.resume_service.delete(id, identity.user_id).await?;
    Ok(Json(MessageResponse::new("Resume deleted successfully")))
}
