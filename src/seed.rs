//! Demo data for local development.
//!
//! Wipes the store, then registers ten users, gives the first five a
//! company with one vacancy each, and has the other five apply. Everything
//! goes through the services, so passwords are hashed and company owners
//! are promoted to `EMPLOYER` exactly as they would be over HTTP.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::Store;
use crate::dto::application_dto::CreateApplicationPayload;
use crate::dto::company_dto::CreateCompanyPayload;
use crate::dto::user_dto::CreateUserPayload;
use crate::dto::vacancy_dto::CreateVacancyPayload;
use crate::error::Result;
use crate::utils::token::TokenIssuer;
use crate::AppState;

pub const DEMO_PASSWORD: &str = "password123";

const USERS: [&str; 10] = [
    "Alice", "Bob", "Charlie", "David", "Eve", "Frank", "Grace", "Hannah", "Ivy", "Jack",
];

const COMPANIES: [(&str, &str, &str); 5] = [
    ("TechCorp", "A leading tech company", "New York"),
    ("InnovateX", "Innovative solutions for the future", "San Francisco"),
    ("WebWorks", "Web development and design agency", "Los Angeles"),
    ("DataPro", "Big data solutions for businesses", "Chicago"),
    ("SoftWareHouse", "Custom software development", "Austin"),
];

const VACANCIES: [(&str, &str, i64); 5] = [
    ("Frontend Developer", "Join our dynamic frontend team", 70000),
    ("Backend Developer", "Looking for a skilled backend developer", 80000),
    ("UI/UX Designer", "Design beautiful user interfaces", 75000),
    ("Data Scientist", "Analyze data to drive business decisions", 90000),
    ("Software Engineer", "Develop high-quality software applications", 85000),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub users: usize,
    pub companies: usize,
    pub vacancies: usize,
    pub applications: usize,
}

pub async fn seed_demo_data(store: Arc<dyn Store>, tokens: TokenIssuer) -> Result<SeedReport> {
    store.clear().await?;
    tracing::warn!("store cleared for demo data");

    let state = AppState::new(store, tokens);
    let mut report = SeedReport::default();

    let mut user_ids: Vec<Uuid> = Vec::with_capacity(USERS.len());
    for name in USERS {
        let user = state
            .user_service
            .create_user(CreateUserPayload {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: DEMO_PASSWORD.to_string(),
                phone: None,
            })
            .await?;
        user_ids.push(user.id);
        report.users += 1;
    }

    let (employers, seekers) = user_ids.split_at(COMPANIES.len());
    for (((employer_id, company), vacancy), applicant_id) in employers
        .iter()
        .zip(COMPANIES)
        .zip(VACANCIES)
        .zip(seekers)
    {
        let (name, description, location) = company;
        let company = state
            .company_service
            .create_company(
                *employer_id,
                CreateCompanyPayload {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    location: Some(location.to_string()),
                    employer_id: None,
                },
            )
            .await?;
        report.companies += 1;

        let (title, description, salary) = vacancy;
        let vacancy = state
            .vacancy_service
            .create(
                *employer_id,
                CreateVacancyPayload {
                    title: title.to_string(),
                    description: description.to_string(),
                    location: company.location.clone(),
                    salary_from: Some(Decimal::from(salary)),
                    salary_to: Some(Decimal::from(salary)),
                    skills: Vec::new(),
                    fulltime: true,
                    parttime: false,
                    remote: false,
                    company_id: company.id,
                },
            )
            .await?;
        report.vacancies += 1;

        state
            .application_service
            .create(
                *applicant_id,
                CreateApplicationPayload {
                    vacancy_id: vacancy.id,
                    cover_letter: None,
                },
            )
            .await?;
        report.applications += 1;
    }

    tracing::info!(
        users = report.users,
        companies = report.companies,
        vacancies = report.vacancies,
        applications = report.applications,
        "demo data created"
    );
    Ok(report)
}
