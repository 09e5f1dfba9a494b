pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::Store;
use crate::services::{
    application_service::ApplicationService, company_service::CompanyService,
    directory_service::DirectoryService, resume_service::ResumeService,
    user_service::UserService, vacancy_service::VacancyService,
};
use crate::utils::token::TokenIssuer;

#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenIssuer,
    pub user_service: UserService,
    pub company_service: CompanyService,
    pub vacancy_service: VacancyService,
    pub application_service: ApplicationService,
    pub resume_service: ResumeService,
    pub directory_service: DirectoryService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenIssuer) -> Self {
        let user_service = UserService::new(store.clone(), tokens.clone());
        let company_service = CompanyService::new(store.clone());
        let vacancy_service = VacancyService::new(store.clone());
        let application_service = ApplicationService::new(store.clone());
        let resume_service = ResumeService::new(store.clone());
        let directory_service = DirectoryService::new(store);

        Self {
            tokens,
            user_service,
            company_service,
            vacancy_service,
            application_service,
            resume_service,
            directory_service,
        }
    }
}
