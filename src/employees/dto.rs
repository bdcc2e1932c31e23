use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::employees::repo_types::Department;
use crate::error::ApiError;
use crate::validate::is_valid_email;

/// Full employee record as submitted on create and update.
#[derive(Debug, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub date_of_birth: Date,
    pub role: String,
    pub department: Department,
    pub salary: f64,
    pub elected_benefits: bool,
}

impl EmployeeInput {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Name must not be empty".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
        if self.role.trim().is_empty() {
            return Err(ApiError::Validation("Role must not be empty".into()));
        }
        let today = OffsetDateTime::now_utc().date();
        if self.date_of_birth > birthday_cutoff(today) {
            return Err(ApiError::Validation(
                "Employees must be at least 18 years old".into(),
            ));
        }
        Ok(())
    }
}

/// Latest birth date that still makes someone 18 today.
fn birthday_cutoff(today: Date) -> Date {
    // Feb 29 has no calendar match 18 years earlier; fall back to the 28th.
    Date::from_calendar_date(today.year() - 18, today.month(), today.day())
        .or_else(|_| Date::from_calendar_date(today.year() - 18, today.month(), 28))
        .expect("day 28 exists in every month")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn input(date_of_birth: Date) -> EmployeeInput {
        EmployeeInput {
            name: "Ada Lovelace".into(),
            email: "ada@x.com".into(),
            date_of_birth,
            role: "Engineer".into(),
            department: Department::Engineering,
            salary: 120_000.0,
            elected_benefits: true,
        }
    }

    #[test]
    fn accepts_adult_employee() {
        assert!(input(date!(1990 - 05 - 01)).validate().is_ok());
    }

    #[test]
    fn rejects_minor() {
        let today = OffsetDateTime::now_utc().date();
        let minor_dob = Date::from_calendar_date(today.year() - 10, time::Month::January, 15)
            .expect("valid date");
        let err = input(minor_dob).validate().unwrap_err();
        assert!(err.to_string().contains("18"));
    }

    #[test]
    fn rejects_empty_name_and_role() {
        let mut i = input(date!(1990 - 05 - 01));
        i.name = "   ".into();
        assert!(i.validate().is_err());

        let mut i = input(date!(1990 - 05 - 01));
        i.role = "".into();
        assert!(i.validate().is_err());
    }

    #[test]
    fn rejects_bad_email() {
        let mut i = input(date!(1990 - 05 - 01));
        i.email = "not-an-email".into();
        assert!(i.validate().is_err());
    }

    #[test]
    fn cutoff_is_exactly_eighteen_years_back() {
        let cutoff = birthday_cutoff(date!(2026 - 08 - 06));
        assert_eq!(cutoff, date!(2008 - 08 - 06));
    }

    #[test]
    fn cutoff_handles_leap_day() {
        let cutoff = birthday_cutoff(date!(2024 - 02 - 29));
        assert_eq!(cutoff, date!(2006 - 02 - 28));
    }
}
