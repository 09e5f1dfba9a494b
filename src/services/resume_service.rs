use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{Store, StoreError};
use crate::dto::resume_dto::{CreateResumePayload, UpdateResumePayload};
use crate::error::{Entity, Error, Result};
use crate::models::resume::Resume;

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn Store>,
}

impl ResumeService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner_id: Uuid, payload: CreateResumePayload) -> Result<Resume> {
        payload.validate()?;
        if self.store.find_user(owner_id).await?.is_none() {
            return Err(Error::Reference(Entity::User));
        }
        let resume = self
            .store
            .insert_resume(owner_id, payload)
            .await
            .map_err(|e| match e {
                StoreError::ForeignKeyViolation(_) => Error::Reference(Entity::User),
                other => Error::Store(other),
            })?;
        tracing::info!(resume_id = %resume.id, "resume created");
        Ok(resume)
    }

    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: UpdateResumePayload,
    ) -> Result<Resume> {
        patch.validate()?;
        self.owned_resume(id, caller_id).await?;
        let resume = self
            .store
            .update_resume(id, patch)
            .await?
            .ok_or(Error::NotFound(Entity::Resume))?;
        tracing::info!(resume_id = %id, "resume updated");
        Ok(resume)
    }

    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<()> {
        self.owned_resume(id, caller_id).await?;
        if !self.store.delete_resume(id).await? {
            return Err(Error::NotFound(Entity::Resume));
        }
        tracing::info!(resume_id = %id, "resume deleted");
        Ok(())
    }

    async fn owned_resume(&self, id: Uuid, caller_id: Uuid) -> Result<Resume> {
        let resume = self
            .store
            .find_resume(id)
            .await?
            .ok_or(Error::NotFound(Entity::Resume))?;
        if resume.user_id != caller_id {
            return Err(Error::Forbidden(
                "You can only change your own resumes".to_string(),
            ));
        }
        Ok(resume)
    }
}
