use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    employees::{dto::EmployeeInput, repo_types::Employee},
    error::ApiError,
    state::AppState,
};

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employees", post(create_employee))
        .route(
            "/employee/:id",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_employee(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<EmployeeInput>,
) -> Result<(StatusCode, HeaderMap, Json<Employee>), ApiError> {
    payload.validate()?;

    let employee = Employee::create(&state.db, &payload).await?;
    info!(employee_id = %employee.employee_id, "employee created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/employee/{}", employee.employee_id).parse().unwrap(),
    );

    Ok((StatusCode::CREATED, headers, Json(employee)))
}

#[instrument(skip(state))]
pub async fn get_employee(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
    let employee = Employee::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    Ok(Json(employee))
}

#[instrument(skip(state, payload))]
pub async fn update_employee(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeeInput>,
) -> Result<Json<Employee>, ApiError> {
    payload.validate()?;

    let employee = Employee::update(&state.db, id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    info!(employee_id = %employee.employee_id, "employee updated");
    Ok(Json(employee))
}

#[instrument(skip(state))]
pub async fn delete_employee(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Employee>, ApiError> {
    let employee = Employee::delete(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    info!(employee_id = %employee.employee_id, "employee deleted");
    Ok(Json(employee))
}
