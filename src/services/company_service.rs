use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{Store, StoreError};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::error::{Entity, Error, Result};
use crate::models::company::Company;

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn Store>,
}

pub(crate) fn ensure_owner(company: &Company, caller_id: Uuid) -> Result<()> {
    if company.employer_id != caller_id {
        return Err(Error::Forbidden(
            "Only the company's employer can do this".to_string(),
        ));
    }
    Ok(())
}

fn employer_reference(err: StoreError) -> Error {
    match err {
        StoreError::ForeignKeyViolation(_) => Error::Reference(Entity::Employer),
        other => Error::Store(other),
    }
}

impl CompanyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Creates a company owned by the caller and promotes the caller to
    /// `EMPLOYER` in the same write.
    pub async fn create_company(
        &self,
        caller_id: Uuid,
        payload: CreateCompanyPayload,
    ) -> Result<Company> {
        payload.validate()?;
        let employer_id = payload.employer_id.unwrap_or(caller_id);
        if employer_id != caller_id {
            return Err(Error::Forbidden(
                "Companies can only be created for yourself".to_string(),
            ));
        }
        if self.store.find_user(employer_id).await?.is_none() {
            return Err(Error::Reference(Entity::Employer));
        }

        let company = self
            .store
            .insert_company(employer_id, payload)
            .await
            .map_err(employer_reference)?;

        tracing::info!(company_id = %company.id, employer_id = %employer_id, "company created");
        Ok(company)
    }

    /// Partial update. A new `employerId` transfers ownership and promotes
    /// the new owner.
    pub async fn update_company(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: UpdateCompanyPayload,
    ) -> Result<Company> {
        patch.validate()?;
        let company = self
            .store
            .find_company(id)
            .await?
            .ok_or(Error::NotFound(Entity::Company))?;
        ensure_owner(&company, caller_id)?;

        if let Some(employer_id) = patch.employer_id {
            if self.store.find_user(employer_id).await?.is_none() {
                return Err(Error::Reference(Entity::Employer));
            }
        }

        let updated = self
            .store
            .update_company(id, patch)
            .await
            .map_err(employer_reference)?
            .ok_or(Error::NotFound(Entity::Company))?;

        if updated.employer_id != company.employer_id {
            tracing::info!(
                company_id = %id,
                from = %company.employer_id,
                to = %updated.employer_id,
                "company ownership transferred"
            );
        }
        Ok(updated)
    }

    /// Deletes the company together with its vacancies and their applications.
    pub async fn delete_company(&self, id: Uuid, caller_id: Uuid) -> Result<()> {
        let company = self
            .store
            .find_company(id)
            .await?
            .ok_or(Error::NotFound(Entity::Company))?;
        ensure_owner(&company, caller_id)?;

        if !self.store.delete_company(id).await? {
            return Err(Error::NotFound(Entity::Company));
        }
        tracing::info!(company_id = %id, "company deleted");
        Ok(())
    }
}
