use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationStatusPayload},
    error::Result,
    extractors::{AppJson, AppPath},
    utils::token::Identity,
    AppState,
};

#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppJson(payload): AppJson<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .create(identity.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.directory_service.get_application(id).await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    let application = state
        .application_service
        .set_status(id, identity.user_id, payload.status)
        .await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn list_user_applications(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.directory_service.applications_for_user(user_id).await?;
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn list_vacancy_applications(
    State(state): State<AppState>,
    AppPath(vacancy_id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state
        .directory_service
        .applications_for_vacancy(vacancy_id)
        .await?;
    Ok(Json(items))
}
