use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub skills: Vec<String>,
    pub fulltime: bool,
    pub parttime: bool,
    pub remote: bool,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vacancy {
    /// Case-insensitive substring match over title or description.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Skills are a set: keep first occurrence order, drop repeats.
pub fn dedup_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_skills_is_case_insensitive_and_keeps_order() {
        let skills = vec![
            "Rust".to_string(),
            "SQL".to_string(),
            "rust".to_string(),
            " ".to_string(),
            "Docker".to_string(),
        ];
        assert_eq!(dedup_skills(skills), vec!["Rust", "SQL", "Docker"]);
    }
}
