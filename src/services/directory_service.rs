//! Read-only views over the store, with related rows expanded.
//!
//! Lookups by id fail with `NotFound`; listings return an empty vector when
//! nothing matches.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::database::Store;
use crate::dto::application_dto::{ApplicationDetail, ApplicationWithUser, ApplicationWithVacancy};
use crate::dto::company_dto::CompanyDetail;
use crate::dto::user_dto::{UserProfile, UserResponse};
use crate::dto::vacancy_dto::{VacancyDetail, VacancyWithCompany};
use crate::error::{Entity, Error, Result};
use crate::models::company::Company;
use crate::models::resume::Resume;
use crate::models::user::User;
use crate::models::vacancy::Vacancy;

#[derive(Clone)]
pub struct DirectoryService {
    store: Arc<dyn Store>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.store
            .find_user(id)
            .await?
            .ok_or(Error::NotFound(Entity::User))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        let user = self.get_user(user_id).await?;
        let applications = self.store.list_applications_by_user(user_id).await?;
        let companies = self.store.list_companies_by_employer(user_id).await?;
        let resumes = self.store.list_resumes_by_user(user_id).await?;
        Ok(UserProfile {
            user: user.into(),
            applications,
            companies,
            resumes,
        })
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        Ok(self.store.list_companies().await?)
    }

    pub async fn get_company(&self, id: Uuid) -> Result<CompanyDetail> {
        let company = self
            .store
            .find_company(id)
            .await?
            .ok_or(Error::NotFound(Entity::Company))?;
        let employer = self.store.find_user(company.employer_id).await?;
        let vacancies = self.store.list_vacancies_by_company(id).await?;
        Ok(CompanyDetail {
            company,
            employer: employer.map(UserResponse::from),
            vacancies,
        })
    }

    pub async fn list_vacancies(&self) -> Result<Vec<VacancyWithCompany>> {
        let vacancies = self.store.list_vacancies().await?;
        self.with_companies(vacancies).await
    }

    pub async fn search_vacancies(&self, query: Option<&str>) -> Result<Vec<VacancyWithCompany>> {
        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Err(Error::BadRequest("Query parameter is required".to_string()));
        }
        let vacancies = self.store.search_vacancies(query).await?;
        self.with_companies(vacancies).await
    }

    pub async fn get_vacancy(&self, id: Uuid) -> Result<VacancyDetail> {
        let vacancy = self
            .store
            .find_vacancy(id)
            .await?
            .ok_or(Error::NotFound(Entity::Vacancy))?;
        let company = self.store.find_company(vacancy.company_id).await?;
        let applications = self.store.list_applications_by_vacancy(id).await?;
        Ok(VacancyDetail {
            vacancy,
            company,
            applications,
        })
    }

    /// Vacancies posted under any company the user owns.
    pub async fn vacancies_for_user(&self, user_id: Uuid) -> Result<Vec<Vacancy>> {
        Ok(self.store.list_vacancies_by_employer(user_id).await?)
    }

    pub async fn get_application(&self, id: Uuid) -> Result<ApplicationDetail> {
        let application = self
            .store
            .find_application(id)
            .await?
            .ok_or(Error::NotFound(Entity::Application))?;
        let vacancy = self.store.find_vacancy(application.vacancy_id).await?;
        let user = self.store.find_user(application.user_id).await?;
        Ok(ApplicationDetail {
            application,
            vacancy,
            user: user.map(UserResponse::from),
        })
    }

    pub async fn applications_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithVacancy>> {
        let applications = self.store.list_applications_by_user(user_id).await?;
        let mut items = Vec::with_capacity(applications.len());
        for application in applications {
            let vacancy = self.store.find_vacancy(application.vacancy_id).await?;
            items.push(ApplicationWithVacancy {
                application,
                vacancy,
            });
        }
        Ok(items)
    }

    pub async fn applications_for_vacancy(
        &self,
        vacancy_id: Uuid,
    ) -> Result<Vec<ApplicationWithUser>> {
        let applications = self.store.list_applications_by_vacancy(vacancy_id).await?;
        let mut items = Vec::with_capacity(applications.len());
        for application in applications {
            let user = self.store.find_user(application.user_id).await?;
            items.push(ApplicationWithUser {
                application,
                user: user.map(UserResponse::from),
            });
        }
        Ok(items)
    }

    pub async fn list_resumes(&self) -> Result<Vec<Resume>> {
        Ok(self.store.list_resumes().await?)
    }

    pub async fn get_resume(&self, id: Uuid) -> Result<Resume> {
        self.store
            .find_resume(id)
            .await?
            .ok_or(Error::NotFound(Entity::Resume))
    }

    async fn with_companies(&self, vacancies: Vec<Vacancy>) -> Result<Vec<VacancyWithCompany>> {
        if vacancies.is_empty() {
            return Ok(Vec::new());
        }
        let companies: HashMap<Uuid, Company> = self
            .store
            .list_companies()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        Ok(vacancies
            .into_iter()
            .map(|vacancy| VacancyWithCompany {
                company: companies.get(&vacancy.company_id).cloned(),
                vacancy,
            })
            .collect())
    }
}
