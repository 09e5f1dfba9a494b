use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::{
        company_dto::{CreateCompanyPayload, UpdateCompanyPayload},
        MessageResponse,
    },
    error::Result,
    extractors::{AppJson, AppPath},
    utils::token::Identity,
    AppState,
};

#[axum::debug_handler]
pub async fn list_companies(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let companies = state.directory_service.list_companies().await?;
    Ok(Json(companies))
}

#[axum::debug_handler]
pub async fn get_company(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    let company = state.directory_service.get_company(id).await?;
    Ok(Json(company))
}

#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppJson(payload): AppJson<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state
        .company_service
        .create_company(identity.user_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let company = state
        .company_service
        .update_company(id, identity.user_id, payload)
        .await?;
    Ok(Json(company))
}

#[axum::debug_handler]
pub async fn delete_company(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse> {
    state
        .company_service
        .delete_company(id, identity.user_id)
        .await?;
    Ok(Json(MessageResponse::new("Company deleted successfully")))
}
