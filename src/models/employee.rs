use crate::errors::{AppError, AppResult};
use crate::utils::date;
use serde::{Deserialize, Serialize};

/// Roster entry as mirrored in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub matricula: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl EmployeeRecord {
    /// Case-insensitive substring match on name or matricula.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&q) || self.matricula.to_lowercase().contains(&q)
    }
}

/// Validated input of the employee registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub matricula: String,
    /// YYYY-MM-DD
    pub birth_date: String,
}

impl NewEmployee {
    pub fn new(name: &str, matricula: &str, birth_date: &str) -> AppResult<Self> {
        let mut missing = Vec::new();
        if name.trim().is_empty() {
            missing.push("nome");
        }
        if matricula.trim().is_empty() {
            missing.push("matrícula");
        }
        if birth_date.trim().is_empty() {
            missing.push("data de nascimento");
        }
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing.join(", ")));
        }

        let birth =
            date::parse_date(birth_date.trim()).ok_or_else(|| AppError::InvalidDate(birth_date.into()))?;

        Ok(Self {
            name: name.trim().to_string(),
            matricula: matricula.trim().to_string(),
            birth_date: birth.format("%Y-%m-%d").to_string(),
        })
    }

    /// Wire format of the birth date (DD/MM/YYYY).
    pub fn birth_date_br(&self) -> String {
        date::to_br_date(&self.birth_date)
    }
}
