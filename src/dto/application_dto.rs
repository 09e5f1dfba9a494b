use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::UserResponse;
use crate::models::application::{Application, ApplicationStatus};
use crate::models::vacancy::Vacancy;

/// The applicant is always the authenticated caller; a `userId` in the
/// body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationPayload {
    pub vacancy_id: Uuid,
    #[validate(length(max = 10000))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateApplicationStatusPayload {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithVacancy {
    #[serde(flatten)]
    pub application: Application,
    pub vacancy: Option<Vacancy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationWithUser {
    #[serde(flatten)]
    pub application: Application,
    pub user: Option<UserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub vacancy: Option<Vacancy>,
    pub user: Option<UserResponse>,
}
