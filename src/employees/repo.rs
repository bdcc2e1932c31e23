use sqlx::PgPool;
use uuid::Uuid;

use crate::employees::dto::EmployeeInput;
use crate::employees::repo_types::Employee;
use crate::error::ApiError;

impl Employee {
    pub async fn create(db: &PgPool, input: &EmployeeInput) -> Result<Employee, ApiError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, email, date_of_birth, role, department, salary, elected_benefits)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING employee_id, name, email, date_of_birth, role, department,
                      salary, elected_benefits, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.date_of_birth)
        .bind(&input.role)
        .bind(input.department)
        .bind(input.salary)
        .bind(input.elected_benefits)
        .fetch_one(db)
        .await
        .map_err(conflict_on_unique)?;
        Ok(employee)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT employee_id, name, email, date_of_birth, role, department,
                   salary, elected_benefits, created_at
            FROM employees
            WHERE employee_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(employee)
    }

    /// Full-record update. Returns `None` when the id is unknown.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        input: &EmployeeInput,
    ) -> Result<Option<Employee>, ApiError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET name = $2, email = $3, date_of_birth = $4, role = $5,
                department = $6, salary = $7, elected_benefits = $8
            WHERE employee_id = $1
            RETURNING employee_id, name, email, date_of_birth, role, department,
                      salary, elected_benefits, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.date_of_birth)
        .bind(&input.role)
        .bind(input.department)
        .bind(input.salary)
        .bind(input.elected_benefits)
        .fetch_optional(db)
        .await
        .map_err(conflict_on_unique)?;
        Ok(employee)
    }

    /// Returns the deleted record, or `None` when the id is unknown.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            DELETE FROM employees
            WHERE employee_id = $1
            RETURNING employee_id, name, email, date_of_birth, role, department,
                      salary, elected_benefits, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(employee)
    }
}

fn conflict_on_unique(e: sqlx::Error) -> ApiError {
    match e.as_database_error() {
        Some(d) if d.is_unique_violation() => {
            ApiError::Conflict("Employee email already registered".into())
        }
        _ => ApiError::from(e),
    }
}
