use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::database::{Store, StoreError};
use crate::dto::application_dto::CreateApplicationPayload;
use crate::error::{Entity, Error, Result};
use crate::models::application::{Application, ApplicationStatus};

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn Store>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Files an application for `applicant_id`, which must come from the
    /// caller's validated token. One application per (user, vacancy).
    pub async fn create(
        &self,
        applicant_id: Uuid,
        payload: CreateApplicationPayload,
    ) -> Result<Application> {
        payload.validate()?;
        if self.store.find_user(applicant_id).await?.is_none() {
            return Err(Error::Reference(Entity::User));
        }
        if self.store.find_vacancy(payload.vacancy_id).await?.is_none() {
            return Err(Error::Reference(Entity::Vacancy));
        }

        let application = self
            .store
            .insert_application(applicant_id, payload.vacancy_id, payload.cover_letter)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation(_) => {
                    Error::Conflict("You have already applied to this vacancy".to_string())
                }
                StoreError::ForeignKeyViolation(_) => Error::Reference(Entity::Vacancy),
                other => Error::Store(other),
            })?;

        tracing::info!(
            application_id = %application.id,
            vacancy_id = %application.vacancy_id,
            "application submitted"
        );
        Ok(application)
    }

    /// Moves an application through the review lifecycle. Only the employer
    /// owning the vacancy may review, and only `PENDING` applications move.
    pub async fn set_status(
        &self,
        id: Uuid,
        caller_id: Uuid,
        next: ApplicationStatus,
    ) -> Result<Application> {
        let application = self
            .store
            .find_application(id)
            .await?
            .ok_or(Error::NotFound(Entity::Application))?;
        let vacancy = self
            .store
            .find_vacancy(application.vacancy_id)
            .await?
            .ok_or(Error::NotFound(Entity::Application))?;
        let company = self
            .store
            .find_company(vacancy.company_id)
            .await?
            .ok_or(Error::NotFound(Entity::Application))?;
        if company.employer_id != caller_id {
            return Err(Error::Forbidden(
                "Only the vacancy's employer can review applications".to_string(),
            ));
        }

        if !application.status.can_transition_to(next) {
            return Err(Error::IllegalTransition {
                from: application.status,
                to: next,
            });
        }

        match self
            .store
            .compare_and_set_status(id, application.status, next)
            .await?
        {
            Some(updated) => {
                tracing::info!(application_id = %id, from = %application.status, to = %next, "application reviewed");
                Ok(updated)
            }
            // lost a race: report against whatever the row holds now
            None => match self.store.find_application(id).await? {
                Some(current) => Err(Error::IllegalTransition {
                    from: current.status,
                    to: next,
                }),
                None => Err(Error::NotFound(Entity::Application)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MockStore;
    use crate::models::company::Company;
    use crate::models::vacancy::Vacancy;
    use chrono::Utc;

    fn fixtures(owner: Uuid) -> (Application, Vacancy, Company) {
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            description: None,
            location: None,
            employer_id: owner,
            created_at: now,
            updated_at: now,
        };
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            title: "Backend Developer".into(),
            description: "Rust".into(),
            location: None,
            salary_from: None,
            salary_to: None,
            skills: vec![],
            fulltime: true,
            parttime: false,
            remote: false,
            company_id: company.id,
            created_at: now,
            updated_at: now,
        };
        let application = Application {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vacancy_id: vacancy.id,
            cover_letter: None,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        (application, vacancy, company)
    }

    fn mock_for(application: Application, vacancy: Vacancy, company: Company) -> MockStore {
        let mut store = MockStore::new();
        let found = application.clone();
        store
            .expect_find_application()
            .returning(move |_| Ok(Some(found.clone())));
        store
            .expect_find_vacancy()
            .returning(move |_| Ok(Some(vacancy.clone())));
        store
            .expect_find_company()
            .returning(move |_| Ok(Some(company.clone())));
        store
    }

    #[tokio::test]
    async fn stranger_cannot_review() {
        let owner = Uuid::new_v4();
        let (application, vacancy, company) = fixtures(owner);
        let mut store = mock_for(application.clone(), vacancy, company);
        store.expect_compare_and_set_status().never();

        let service = ApplicationService::new(Arc::new(store));
        let err = service
            .set_status(application.id, Uuid::new_v4(), ApplicationStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn lost_race_reports_illegal_transition() {
        let owner = Uuid::new_v4();
        let (application, vacancy, company) = fixtures(owner);
        let mut store = MockStore::new();
        let pending = application.clone();
        let mut rejected = application.clone();
        rejected.status = ApplicationStatus::Rejected;
        let mut reads = 0;
        store.expect_find_application().returning(move |_| {
            reads += 1;
            if reads == 1 {
                Ok(Some(pending.clone()))
            } else {
                Ok(Some(rejected.clone()))
            }
        });
        store
            .expect_find_vacancy()
            .returning(move |_| Ok(Some(vacancy.clone())));
        store
            .expect_find_company()
            .returning(move |_| Ok(Some(company.clone())));
        store
            .expect_compare_and_set_status()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = ApplicationService::new(Arc::new(store));
        let err = service
            .set_status(application.id, owner, ApplicationStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IllegalTransition {
                from: ApplicationStatus::Rejected,
                to: ApplicationStatus::Approved
            }
        ));
    }
}
