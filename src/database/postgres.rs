use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::dto::resume_dto::{CreateResumePayload, UpdateResumePayload};
use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload};
use crate::models::application::{Application, ApplicationStatus};
use crate::models::company::Company;
use crate::models::resume::Resume;
use crate::models::user::{NewUser, Role, User, UserChanges};
use crate::models::vacancy::Vacancy;

const USER_COLUMNS: &str = "id, name, email, password_hash, phone, role, created_at, updated_at";
const COMPANY_COLUMNS: &str =
    "id, name, description, location, employer_id, created_at, updated_at";
const VACANCY_COLUMNS: &str = "id, title, description, location, salary_from, salary_to, skills, fulltime, parttime, remote, company_id, created_at, updated_at";
const APPLICATION_COLUMNS: &str =
    "id, user_id, vacancy_id, cover_letter, status, created_at, updated_at";
const RESUME_COLUMNS: &str = "id, title, description, skills, user_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE metacharacters so user input matches literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, phone, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.phone)
            .bind(Role::JobSeeker.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let sql = format!(
            "UPDATE users
             SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                phone = COALESCE($5, phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_company(
        &self,
        employer_id: Uuid,
        payload: CreateCompanyPayload,
    ) -> StoreResult<Company> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO companies (id, name, description, location, employer_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            COMPANY_COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(Uuid::new_v4())
            .bind(payload.name)
            .bind(payload.description)
            .bind(payload.location)
            .bind(employer_id)
            .fetch_one(&mut *tx)
            .await?;

        promote_to_employer(&mut tx, employer_id).await?;
        tx.commit().await?;
        Ok(company)
    }

    async fn find_company(&self, id: Uuid) -> StoreResult<Option<Company>> {
        let sql = format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS);
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn list_companies(&self) -> StoreResult<Vec<Company>> {
        let sql = format!(
            "SELECT {} FROM companies ORDER BY created_at, id",
            COMPANY_COLUMNS
        );
        let companies = sqlx::query_as::<_, Company>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    async fn list_companies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Company>> {
        let sql = format!(
            "SELECT {} FROM companies WHERE employer_id = $1 ORDER BY created_at, id",
            COMPANY_COLUMNS
        );
        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    async fn update_company(
        &self,
        id: Uuid,
        patch: UpdateCompanyPayload,
    ) -> StoreResult<Option<Company>> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE companies
             SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                employer_id = COALESCE($5, employer_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            COMPANY_COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.description)
            .bind(patch.location)
            .bind(patch.employer_id)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(_), Some(employer_id)) = (&company, patch.employer_id) {
            promote_to_employer(&mut tx, employer_id).await?;
        }
        tx.commit().await?;
        Ok(company)
    }

    async fn delete_company(&self, id: Uuid) -> StoreResult<bool> {
        // vacancies and applications go with it through ON DELETE CASCADE
        let res = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_vacancy(&self, payload: CreateVacancyPayload) -> StoreResult<Vacancy> {
        let sql = format!(
            "INSERT INTO vacancies (
                id, title, description, location, salary_from, salary_to,
                skills, fulltime, parttime, remote, company_id
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {}",
            VACANCY_COLUMNS
        );
        let vacancy = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(Uuid::new_v4())
            .bind(payload.title)
            .bind(payload.description)
            .bind(payload.location)
            .bind(payload.salary_from)
            .bind(payload.salary_to)
            .bind(payload.skills)
            .bind(payload.fulltime)
            .bind(payload.parttime)
            .bind(payload.remote)
            .bind(payload.company_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn find_vacancy(&self, id: Uuid) -> StoreResult<Option<Vacancy>> {
        let sql = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        let vacancy = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn list_vacancies(&self) -> StoreResult<Vec<Vacancy>> {
        let sql = format!(
            "SELECT {} FROM vacancies ORDER BY created_at, id",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_vacancies_by_company(&self, company_id: Uuid) -> StoreResult<Vec<Vacancy>> {
        let sql = format!(
            "SELECT {} FROM vacancies WHERE company_id = $1 ORDER BY created_at, id",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_vacancies_by_employer(&self, employer_id: Uuid) -> StoreResult<Vec<Vacancy>> {
        let sql = format!(
            "SELECT {} FROM vacancies
             WHERE company_id IN (SELECT id FROM companies WHERE employer_id = $1)
             ORDER BY created_at, id",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn search_vacancies(&self, query: &str) -> StoreResult<Vec<Vacancy>> {
        let sql = format!(
            "SELECT {} FROM vacancies
             WHERE title ILIKE $1 OR description ILIKE $1
             ORDER BY created_at, id",
            VACANCY_COLUMNS
        );
        let items = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn update_vacancy(
        &self,
        id: Uuid,
        patch: UpdateVacancyPayload,
    ) -> StoreResult<Option<Vacancy>> {
        let sql = format!(
            "UPDATE vacancies
             SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                salary_from = COALESCE($5, salary_from),
                salary_to = COALESCE($6, salary_to),
                skills = COALESCE($7, skills),
                fulltime = COALESCE($8, fulltime),
                parttime = COALESCE($9, parttime),
                remote = COALESCE($10, remote),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            VACANCY_COLUMNS
        );
        let vacancy = sqlx::query_as::<_, Vacancy>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.location)
            .bind(patch.salary_from)
            .bind(patch.salary_to)
            .bind(patch.skills)
            .bind(patch.fulltime)
            .bind(patch.parttime)
            .bind(patch.remote)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vacancy)
    }

    async fn delete_vacancy(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_application(
        &self,
        user_id: Uuid,
        vacancy_id: Uuid,
        cover_letter: Option<String>,
    ) -> StoreResult<Application> {
        let sql = format!(
            "INSERT INTO applications (id, user_id, vacancy_id, cover_letter, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(vacancy_id)
            .bind(cover_letter)
            .bind(ApplicationStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    async fn find_application(&self, id: Uuid) -> StoreResult<Option<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE id = $1",
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn list_applications_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE user_id = $1 ORDER BY created_at, id",
            APPLICATION_COLUMNS
        );
        let items = sqlx::query_as::<_, Application>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_applications_by_vacancy(
        &self,
        vacancy_id: Uuid,
    ) -> StoreResult<Vec<Application>> {
        let sql = format!(
            "SELECT {} FROM applications WHERE vacancy_id = $1 ORDER BY created_at, id",
            APPLICATION_COLUMNS
        );
        let items = sqlx::query_as::<_, Application>(&sql)
            .bind(vacancy_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn compare_and_set_status(
        &self,
        id: Uuid,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> StoreResult<Option<Application>> {
        let sql = format!(
            "UPDATE applications
             SET status = $3, updated_at = NOW()
             WHERE id = $1 AND status = $2
             RETURNING {}",
            APPLICATION_COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&sql)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn insert_resume(
        &self,
        user_id: Uuid,
        payload: CreateResumePayload,
    ) -> StoreResult<Resume> {
        let sql = format!(
            "INSERT INTO resumes (id, title, description, skills, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            RESUME_COLUMNS
        );
        let resume = sqlx::query_as::<_, Resume>(&sql)
            .bind(Uuid::new_v4())
            .bind(payload.title)
            .bind(payload.description)
            .bind(payload.skills)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(resume)
    }

    async fn find_resume(&self, id: Uuid) -> StoreResult<Option<Resume>> {
        let sql = format!("SELECT {} FROM resumes WHERE id = $1", RESUME_COLUMNS);
        let resume = sqlx::query_as::<_, Resume>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(resume)
    }

    async fn list_resumes(&self) -> StoreResult<Vec<Resume>> {
        let sql = format!("SELECT {} FROM resumes ORDER BY created_at, id", RESUME_COLUMNS);
        let items = sqlx::query_as::<_, Resume>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_resumes_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Resume>> {
        let sql = format!(
            "SELECT {} FROM resumes WHERE user_id = $1 ORDER BY created_at, id",
            RESUME_COLUMNS
        );
        let items = sqlx::query_as::<_, Resume>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn update_resume(
        &self,
        id: Uuid,
        patch: UpdateResumePayload,
    ) -> StoreResult<Option<Resume>> {
        let sql = format!(
            "UPDATE resumes
             SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                skills = COALESCE($4, skills),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            RESUME_COLUMNS
        );
        let resume = sqlx::query_as::<_, Resume>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(patch.skills)
            .fetch_optional(&self.pool)
            .await?;
        Ok(resume)
    }

    async fn delete_resume(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("TRUNCATE applications, resumes, vacancies, companies, users")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

async fn promote_to_employer(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
) -> StoreResult<()> {
    sqlx::query(
        "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 AND role <> $2",
    )
    .bind(user_id)
    .bind(Role::Employer.as_str())
    .execute(&mut **tx)
    .await?;
    Ok(())
}
