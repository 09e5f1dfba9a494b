use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::company::Company;
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub fulltime: bool,
    #[serde(default)]
    pub parttime: bool,
    #[serde(default)]
    pub remote: bool,
    pub company_id: Uuid,
}

impl CreateVacancyPayload {
    pub fn check_salary_range(&self) -> Result<()> {
        check_salary_range(self.salary_from, self.salary_to)
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVacancyPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub skills: Option<Vec<String>>,
    pub fulltime: Option<bool>,
    pub parttime: Option<bool>,
    pub remote: Option<bool>,
}

/// Salaries are non-negative and `from` never exceeds `to`.
pub fn check_salary_range(from: Option<Decimal>, to: Option<Decimal>) -> Result<()> {
    if [from, to].iter().flatten().any(|v| *v < Decimal::ZERO) {
        return Err(Error::BadRequest("Salary must not be negative".to_string()));
    }
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(Error::BadRequest(
                "salaryFrom must not exceed salaryTo".to_string(),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancySearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyWithCompany {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyDetail {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub company: Option<Company>,
    pub applications: Vec<Application>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_range_must_be_ordered() {
        assert!(check_salary_range(Some(Decimal::from(10)), Some(Decimal::from(20))).is_ok());
        assert!(check_salary_range(Some(Decimal::from(70000)), None).is_ok());
        assert!(check_salary_range(None, None).is_ok());
        assert!(matches!(
            check_salary_range(Some(Decimal::from(30)), Some(Decimal::from(20))),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            check_salary_range(None, Some(Decimal::from(-1))),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn patch_fields_are_optional_and_camel_case() {
        let patch: UpdateVacancyPayload =
            serde_json::from_value(serde_json::json!({ "salaryTo": 90000, "remote": false }))
                .unwrap();
        assert_eq!(patch.salary_to, Some(Decimal::from(90000)));
        assert_eq!(patch.remote, Some(false));
        assert!(patch.title.is_none());
        assert!(patch.skills.is_none());
        assert!(patch.fulltime.is_none());
    }
}
