use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Closed set of departments, stored as a Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "department", rename_all = "UPPERCASE")]
pub enum Department {
    Hr,
    Sales,
    It,
    Engineering,
}

/// Employee record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub employee_id: Uuid,
    pub name: String,
    pub email: String,
    pub date_of_birth: Date,
    pub role: String,
    pub department: Department,
    pub salary: f64,
    pub elected_benefits: bool,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Department::Engineering).unwrap(),
            "\"ENGINEERING\""
        );
        assert_eq!(
            serde_json::from_str::<Department>("\"HR\"").unwrap(),
            Department::Hr
        );
    }

    #[test]
    fn department_rejects_unknown_values() {
        assert!(serde_json::from_str::<Department>("\"LEGAL\"").is_err());
    }
}
