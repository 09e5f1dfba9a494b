//! In-process [`Store`] used by the test suite and by `DATABASE_URL=memory://`.
//!
//! All tables sit behind one `RwLock`, so every trait method observes and
//! commits a consistent snapshot, matching the transactional guarantees of
//! `PgStore`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::dto::resume_dto::{CreateResumePayload, UpdateResumePayload};
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::resume::Resume;
use crate::models::user::{NewUser, Role, User, UserChanges};
use crate::models::vacancy::Vacancy;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    companies: Vec<Company>,
    vacancies: Vec<Vacancy>,
    applications: Vec<Application>,
    resumes: Vec<Resume>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn promote(&mut self, user_id: Uuid) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            if user.role != Role::Employer {
                user.role = Role::Employer;
                user.updated_at = Utc::now();
            }
        }
    }

    fn remove_vacancies_where(&mut self, doomed: impl Fn(&Vacancy) -> bool) {
        let ids: Vec<Uuid> = self
            .vacancies
            .iter()
            .filter(|v| doomed(v))
            .map(|v| v.id)
            .collect();
        self.vacancies.retain(|v| !ids.contains(&v.id));
        self.applications.retain(|a| !ids.contains(&a.vacancy_id));
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn foreign_key(name: &str) -> StoreError {
    StoreError::ForeignKeyViolation(name.to_string())
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            role: Role::JobSeeker,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &changes.email {
            if tables.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::UniqueViolation("users_email_key".to_string()));
            }
        }
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(phone) = changes.phone {
            user.phone = Some(phone);
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn insert_company(
        &self,
        employer_id: Uuid,
        payload: CreateCompanyPayload,
    ) -> StoreResult<Company> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(employer_id) {
            return Err(foreign_key("companies_employer_id_fkey"));
        }
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: payload.name,
            description: payload.description,
            location: payload.location,
            employer_id,
            created_at: now,
            updated_at: now,
        };
        tables.companies.push(company.clone());
        tables.promote(employer_id);
        Ok(company)
    }

    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        let tables = self.tables.read().await;
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn list_companies(&self) -> StoreResult<Vec<Company>> {
        Ok(self.tables.read().await.companies.clone())
    }

    async fn list_companies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Company>> {
        let tables = self.tables.read().await;
        Ok(tables
            .companies
            .iter()
            .filter(|c| c.employer_id == employer_id)
            .cloned()
            .collect())
    }

    async fn update_company(
        &self,
        id: Uuid,
        patch: UpdateCompanyPayload,
    ) -> StoreResult<Option<Company>> {
        let mut tables = self.tables.write().await;
        if let Some(employer_id) = patch.employer_id {
            if !tables.user_exists(employer_id) {
                return Err(foreign_key("companies_employer_id_fkey"));
            }
        }
        let Some(company) = tables.companies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            company.name = name;
        }
        if let Some(description) = patch.description {
            company.description = Some(description);
        }
        if let Some(location) = patch.location {
            company.location = Some(location);
        }
        if let Some(employer_id) = patch.employer_id {
            company.employer_id = employer_id;
        }
        company.updated_at = Utc::now();
        let updated = company.clone();
        if let Some(employer_id) = patch.employer_id {
            tables.promote(employer_id);
        }
        Ok(Some(updated))
    }

    async fn delete_company(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.companies.len();
        tables.companies.retain(|c| c.id != id);
        if tables.companies.len() == before {
            return Ok(false);
        }
        tables.remove_vacancies_where(|v| v.company_id == id);
        Ok(true)
    }

    async fn insert_vacancy(&self, payload: CreateVacancyPayload) -> StoreResult<Vacancy> {
        let mut tables = self.tables.write().await;
        if !tables.companies.iter().any(|c| c.id == payload.company_id) {
            return Err(foreign_key("vacancies_company_id_fkey"));
        }
        let now = Utc::now();
        let vacancy = Vacancy {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            location: payload.location,
            salary_from: payload.salary_from,
            salary_to: payload.salary_to,
            skills: payload.skills,
            fulltime: payload.fulltime,
            parttime: payload.parttime,
            remote: payload.remote,
            company_id: payload.company_id,
            created_at: now,
            updated_at: now,
        };
        tables.vacancies.push(vacancy.clone());
        Ok(vacancy)
    }

    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>> {
        let tables = self.tables.read().await;
        Ok(tables.vacancies.iter().find(|v| v.id == id).cloned())
    }

    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        Ok(self.tables.read().await.vacancies.clone())
    }

    async fn list_vacancies_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Vacancy>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vacancies
            .iter()
            .filter(|v| v.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn list_vacancies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Vacancy>> {
        let tables = self.tables.read().await;
        let owned: Vec<Uuid> = tables
            .companies
            .iter()
            .filter(|c| c.employer_id == employer_id)
            .map(|c| c.id)
            .collect();
        Ok(tables
            .vacancies
            .iter()
            .filter(|v| owned.contains(&v.company_id))
            .cloned()
            .collect())
    }

    async fn search_vacancies(&self, query: &str) -> StoreResult<Vec<Vacancy>> {
        let tables = self.tables.read().await;
        Ok(tables
            .vacancies
            .iter()
            .filter(|v| v.matches(query))
            .cloned()
            .collect())
    }

    async fn update_vacancy(
        &self,
        id: Uuid,
        patch: UpdateVacancyPayload,
    ) -> StoreResult<Option<Vacancy>> {
        let mut tables = self.tables.write().await;
        let Some(vacancy) = tables.vacancies.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            vacancy.title = title;
        }
        if let Some(description) = patch.description {
            vacancy.description = description;
        }
        if let Some(location) = patch.location {
            vacancy.location = Some(location);
        }
        if let Some(salary_from) = patch.salary_from {
            vacancy.salary_from = Some(salary_from);
        }
        if let Some(salary_to) = patch.salary_to {
            vacancy.salary_to = Some(salary_to);
        }
        if let Some(skills) = patch.skills {
            vacancy.skills = skills;
        }
        if let Some(fulltime) = patch.fulltime {
            vacancy.fulltime = fulltime;
        }
        if let Some(parttime) = patch.parttime {
            vacancy.parttime = parttime;
        }
        if let Some(remote) = patch.remote {
            vacancy.remote = remote;
        }
        vacancy.updated_at = Utc::now();
        Ok(Some(vacancy.clone()))
    }

    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        if !tables.vacancies.iter().any(|v| v.id == id) {
            return Ok(false);
        }
        tables.remove_vacancies_where(|v| v.id == id);
        Ok(true)
    }

    async fn insert_application(
        &self,
        user_id: Uuid,
        vacancy_id: Uuid,
        cover_letter: Option<String>,
    ) -> StoreResult<Application> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(user_id) {
            return Err(foreign_key("applications_user_id_fkey"));
        }
        if !tables.vacancies.iter().any(|v| v.id == vacancy_id) {
            return Err(foreign_key("applications_vacancy_id_fkey"));
        }
        if tables
            .applications
            .iter()
            .any(|a| a.user_id == user_id && a.vacancy_id == vacancy_id)
        {
            return Err(StoreError::UniqueViolation(
                "applications_user_vacancy_key".to_string(),
            ));
        }
        let now = Utc::now();
        let application = Application {
            id: Uuid::new_v4(),
            user_id,
            vacancy_id,
            cover_letter,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(application.clone());
        Ok(application)
    }

    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let tables = self.tables.read().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn list_applications_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Application>> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_applications_by_vacancy(
        &self,
        vacancy_id: Uuid,
    ) -> StoreResult<Vec<Application>> {
        let tables = self.tables.read().await;
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.vacancy_id == vacancy_id)
            .cloned()
            .collect())
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> StoreResult<Option<Application>> {
        let mut tables = self.tables.write().await;
        let Some(application) = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id && a.status == expected)
        else {
            return Ok(None);
        };
        application.status = next;
        application.updated_at = Utc::now();
        Ok(Some(application.clone()))
    }

    async fn insert_resume(
        &self,
        user_id: Uuid,
        payload: CreateResumePayload,
    ) -> StoreResult<Resume> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(user_id) {
            return Err(foreign_key("resumes_user_id_fkey"));
        }
        let now = Utc::now();
        let resume = Resume {
            id: Uuid::new_v4(),
            title: payload.title,
            description: payload.description,
            skills: payload.skills,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.resumes.push(resume.clone());
        Ok(resume)
    }

    async fn find_resume(&self, id: Uuid) -> StoreResult<Option<Resume>> {
        let tables = self.tables.read().await;
        Ok(tables.resumes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_resumes(&self) -> StoreResult<Vec<Resume>> {
        Ok(self.tables.read().await.resumes.clone())
    }

    async fn list_resumes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Resume>> {
        let tables = self.tables.read().await;
        Ok(tables
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_resume(
        &self,
        id: Uuid,
        patch: UpdateResumePayload,
    ) -> StoreResult<Option<Resume>> {
        let mut tables = self.tables.write().await;
        let Some(resume) = tables.resumes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            resume.title = title;
        }
        if let Some(description) = patch.description {
            resume.description = Some(description);
        }
        if let Some(skills) = patch.skills {
            resume.skills = skills;
        }
        resume.updated_at = Utc::now();
        Ok(Some(resume.clone()))
    }

    async fn delete_resume(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.resumes.len();
        tables.resumes.retain(|r| r.id != id);
        Ok(tables.resumes.len() != before)
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.tables.write().await = Tables::default();
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Alice".into(),
            email: email.into(),
            password_hash: "$argon2id$stub".into(),
            phone: None,
        }
    }

    fn new_company(name: &str) -> CreateCompanyPayload {
        CreateCompanyPayload {
            name: name.into(),
            description: None,
            location: None,
            employer_id: None,
        }
    }

    fn new_vacancy(company_id: Uuid, title: &str) -> CreateVacancyPayload {
        CreateVacancyPayload {
            title: title.into(),
            description: "desc".into(),
            location: None,
            salary_from: None,
            salary_to: None,
            skills: vec![],
            fulltime: true,
            parttime: false,
            remote: false,
            company_id,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_unique_violation() {
        let store = MemoryStore::new();
        assert_ok!(store.insert_user(new_user("a@example.com")).await);
        let err = assert_err!(store.insert_user(new_user("a@example.com")).await);
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn company_insert_promotes_employer() {
        let store = MemoryStore::new();
        let user = store.insert_user(new_user("a@example.com")).await.unwrap();
        assert_eq!(user.role, Role::JobSeeker);

        store.insert_company(user.id, new_company("Acme")).await.unwrap();
        let user = store.find_user(user.id).await.unwrap().unwrap();
        assert_eq!(user.role, Role::Employer);
    }

    #[tokio::test]
    async fn company_insert_with_unknown_employer_changes_nothing() {
        let store = MemoryStore::new();
        let err = store
            .insert_company(Uuid::new_v4(), new_company("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(store.list_companies().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_company_cascades() {
        let store = MemoryStore::new();
        let owner = store.insert_user(new_user("o@example.com")).await.unwrap();
        let seeker = store.insert_user(new_user("s@example.com")).await.unwrap();
        let company = store.insert_company(owner.id, new_company("Acme")).await.unwrap();
        let vacancy = store
            .insert_vacancy(new_vacancy(company.id, "Backend Developer"))
            .await
            .unwrap();
        let application = store
            .insert_application(seeker.id, vacancy.id, None)
            .await
            .unwrap();

        assert!(store.delete_company(company.id).await.unwrap());
        assert!(store.find_vacancy(vacancy.id).await.unwrap().is_none());
        assert!(store.find_application(application.id).await.unwrap().is_none());
        assert!(!store.delete_company(company.id).await.unwrap());
    }

    #[tokio::test]
    async fn compare_and_set_only_moves_from_expected() {
        let store = MemoryStore::new();
        let owner = store.insert_user(new_user("o@example.com")).await.unwrap();
        let company = store.insert_company(owner.id, new_company("Acme")).await.unwrap();
        let vacancy = store
            .insert_vacancy(new_vacancy(company.id, "Engineer"))
            .await
            .unwrap();
        let app = store.insert_application(owner.id, vacancy.id, None).await.unwrap();

        let moved = store
            .compare_and_set_status(app.id, ApplicationStatus::Pending, ApplicationStatus::Approved)
            .await
            .unwrap();
        assert_eq!(moved.unwrap().status, ApplicationStatus::Approved);

        let again = store
            .compare_and_set_status(app.id, ApplicationStatus::Pending, ApplicationStatus::Rejected)
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn search_matches_title_or_description_case_insensitively() {
        let store = MemoryStore::new();
        let owner = store.insert_user(new_user("o@example.com")).await.unwrap();
        let company = store.insert_company(owner.id, new_company("Acme")).await.unwrap();
        store
            .insert_vacancy(new_vacancy(company.id, "Backend DEVELOPER"))
            .await
            .unwrap();
        store
            .insert_vacancy(new_vacancy(company.id, "Designer"))
            .await
            .unwrap();

        let hits = store.search_vacancies("developer").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Backend DEVELOPER");
        assert!(store.search_vacancies("astronaut").await.unwrap().is_empty());
    }
}
