//! Persistence boundary.
//!
//! Services talk to storage only through [`Store`]. Each method is one
//! atomic unit of work: compound writes (company creation with employer
//! promotion, cascading deletes, status compare-and-set) either commit as a
//! whole or leave nothing behind.

pub mod memory;
pub mod pool;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::dto::resume_dto::{CreateResumePayload, UpdateResumePayload};
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::resume::Resume;
use crate::models::user::{NewUser, User, UserChanges};
use crate::models::vacancy::Vacancy;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store unavailable: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            let constraint = db.constraint().unwrap_or_default().to_string();
            match db.code().as_deref() {
                Some("23505") => return StoreError::UniqueViolation(constraint),
                Some("23503") => return StoreError::ForeignKeyViolation(constraint),
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>>;

    // Companies
    /// Inserts the company and sets the employer's role to `EMPLOYER`.
    async fn insert_company(
        &self,
        employer_id: Uuid,
        payload: CreateCompanyPayload,
    ) -> StoreResult<Company>;
    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>>;
    async fn list_companies(&self) -> StoreResult<Vec<Company>>;
    async fn list_companies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Company>>;
    /// Applies the present fields; a new `employer_id` is promoted to `EMPLOYER`.
    async fn update_company(
        &self,
        id: Uuid,
        patch: UpdateCompanyPayload,
    ) -> StoreResult<Option<Company>>;
    /// Removes the company with its vacancies and their applications.
    async fn delete_company(&self, id: Uuid) -> StoreResult<bool>;

    // Vacancies
    async fn insert_vacancy(&self, payload: CreateVacancyPayload) -> StoreResult<Vacancy>;
    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>>;
    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>>;
    async fn list_vacancies_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Vacancy>>;
    async fn list_vacancies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Vacancy>>;
    async fn search_vacancies(&self, query: &str) -> StoreResult<Vec<Vacancy>>;
    async fn update_vacancy(
        &self,
        id: Uuid,
        patch: UpdateVacancyPayload,
    ) -> StoreResult<Option<Vacancy>>;
    /// Removes the vacancy with its applications.
    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<bool>;

    // Applications
    /// Inserts a `PENDING` application; a second one for the same
    /// (user, vacancy) pair is a `UniqueViolation`.
    async fn insert_application(
        &self,
        user_id: Uuid,
        vacancy_id: Uuid,
        cover_letter: Option<String>,
    ) -> StoreResult<Application>;
    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>>;
    async fn list_applications_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Application>>;
    async fn list_applications_by_vacancy(
        &self,
        vacancy_id: Uuid,
    ) -> StoreResult<Vec<Application>>;
    /// Sets `next` only while the row still has status `expected`.
    /// `None` means the row is gone or its status moved on.
    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> StoreResult<Option<Application>>;

    // Resumes
    async fn insert_resume(&self, user_id: Uuid, payload: CreateResumePayload)
        -> StoreResult<Resume>;
    async fn find_resume(&self, id: Uuid) -> StoreResult<Option<Resume>>;
    async fn list_resumes(&self) -> StoreResult<Vec<Resume>>;
    async fn list_resumes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Resume>>;
    async fn update_resume(
        &self,
        id: Uuid,
        patch: UpdateResumePayload,
    ) -> StoreResult<Option<Resume>>;
    async fn delete_resume(&self, id: Uuid) -> StoreResult<bool>;

    /// Deletes every row in every table.
    async fn clear(&self) -> StoreResult<()>;

    /// Releases connections. Called once from the process entry point.
    async fn close(&self);
}

/// Opens the store named by `DATABASE_URL` and runs migrations for Postgres.
pub async fn connect(config: &Config) -> crate::error::Result<Arc<dyn Store>> {
    if config.uses_memory_store() {
        tracing::warn!("using in-memory store; data will not survive a restart");
        return Ok(Arc::new(memory::MemoryStore::new()));
    }

    let pool = pool::create_pool(config).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| crate::error::Error::Internal(format!("migration failed: {}", e)))?;
    Ok(Arc::new(postgres::PgStore::new(pool)))
}
