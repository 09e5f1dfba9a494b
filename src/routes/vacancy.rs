use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancySearchQuery},
        MessageResponse,
    },
    error::Result,
    extractors::{AppJson, AppPath, AppQuery},
    utils::token::Identity,
    AppState,
};

#[axum::debug_handler]
pub async fn list_vacancies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.directory_service.list_vacancies().await?;
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn search_vacancies(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<VacancySearchQuery>,
) -> Result<impl IntoResponse> {
    let items = state
        .directory_service
        .search_vacancies(query.query.as_deref())
        .await?;
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.directory_service.get_vacancy(id).await?;
    Ok(Json(vacancy))
}

#[axum::debug_handler]
pub async fn list_user_vacancies(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.directory_service.vacancies_for_user(user_id).await?;
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppJson(payload): AppJson<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state
        .vacancy_service
        .create(identity.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state
        .vacancy_service
        .update(id, identity.user_id, payload)
        .await?;
    Ok(Json(vacancy))
}

#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(id, identity.user_id).await?;
    Ok(Json(MessageResponse::new("Vacancy deleted successfully")))
}
