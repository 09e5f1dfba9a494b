use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{Store, StoreError};
use crate::dto::vacancy_dto::{check_salary_range, CreateVacancyPayload, UpdateVacancyPayload};
use crate::error::{Entity, Error, Result};
use crate::models::company::Company;
use crate::models::vacancy::{dedup_skills, Vacancy};
use crate::services::company_service::ensure_owner;

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn Store>,
}

impl VacancyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, caller_id: Uuid, mut payload: CreateVacancyPayload) -> Result<Vacancy> {
        payload.validate()?;
        payload.check_salary_range()?;

        let company = self
            .store
            .find_company(payload.company_id)
            .await?
            .ok_or(Error::Reference(Entity::Company))?;
        ensure_owner(&company, caller_id)?;

        payload.skills = dedup_skills(payload.skills);
        let vacancy = self
            .store
            .insert_vacancy(payload)
            .await
            .map_err(|e| match e {
                StoreError::ForeignKeyViolation(_) => Error::Reference(Entity::Company),
                other => Error::Store(other),
            })?;

        tracing::info!(vacancy_id = %vacancy.id, company_id = %vacancy.company_id, "vacancy created");
        Ok(vacancy)
    }

    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        mut patch: UpdateVacancyPayload,
    ) -> Result<Vacancy> {
        patch.validate()?;
        let (current, _) = self.owned_vacancy(id, caller_id).await?;

        check_salary_range(
            patch.salary_from.or(current.salary_from),
            patch.salary_to.or(current.salary_to),
        )?;
        patch.skills = patch.skills.map(dedup_skills);

        let vacancy = self
            .store
            .update_vacancy(id, patch)
            .await?
            .ok_or(Error::NotFound(Entity::Vacancy))?;

        tracing::info!(vacancy_id = %id, "vacancy updated");
        Ok(vacancy)
    }

    /// Deletes the vacancy together with its applications.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<()> {
        self.owned_vacancy(id, caller_id).await?;
        if !self.store.delete_vacancy(id).await? {
            return Err(Error::NotFound(Entity::Vacancy));
        }
        tracing::info!(vacancy_id = %id, "vacancy deleted");
        Ok(())
    }

    async fn owned_vacancy(&self, id: Uuid, caller_id: Uuid) -> Result<(Vacancy, Company)> {
        let vacancy = self
            .store
            .find_vacancy(id)
            .await?
            .ok_or(Error::NotFound(Entity::Vacancy))?;
        let company = self
            .store
            .find_company(vacancy.company_id)
            .await?
            .ok_or(Error::NotFound(Entity::Vacancy))?;
        ensure_owner(&company, caller_id)?;
        Ok((vacancy, company))
    }
}
