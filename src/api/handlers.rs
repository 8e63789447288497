//! HTTP request handlers for the roster API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::ShiftFilter;
use crate::error::EngineError;
use crate::models::{Attachment, BusinessHours, Employee, OperationalCost, UserProfile, VocabularyKind, Weekday};
use crate::roster::{DraftScope, EmployeeUpdate, OperationalCostUpdate, ScheduleDraft};

use super::request::{BulkDeleteRequest, DraftQuery, FinancialQuery, VocabularyRequest};
use super::response::{ApiError, ApiErrorResponse, BulkDeleteResponse, EmployeeDetail};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
        .route("/employees/:id/history", get(employee_history))
        .route(
            "/employees/:id/attachments",
            get(list_attachments).post(add_attachment),
        )
        .route(
            "/employees/:id/attachments/:attachment_id",
            delete(delete_attachment),
        )
        .route("/employees/:id/schedule-draft", get(schedule_draft))
        .route("/schedules", get(list_schedules).post(save_schedule))
        .route("/schedules/bulk-delete", post(bulk_delete_schedules))
        .route("/schedules/:id", delete(delete_schedule))
        .route("/coverage", get(coverage_handler))
        .route("/coverage/:day/:hour", get(coverage_cell_handler))
        .route("/payroll", get(payroll_handler))
        .route("/financial", get(financial_handler))
        .route("/reports/weekly", get(weekly_report_handler))
        .route(
            "/operational-costs",
            get(list_operational_costs).post(create_operational_cost),
        )
        .route(
            "/operational-costs/:id",
            patch(update_operational_cost).delete(delete_operational_cost),
        )
        .route("/roles", get(list_roles).post(add_role))
        .route("/roles/:name", put(rename_role).delete(delete_role))
        .route("/areas", get(list_areas).post(add_area))
        .route("/areas/:name", put(rename_area).delete(delete_area))
        .route(
            "/settings/business-hours",
            get(get_business_hours).put(set_business_hours),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", delete(delete_user))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Logs an engine failure against the request and converts it for the client.
fn engine_failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_json<T>(correlation_id: Uuid, payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error))
        }
    }
}

/// Unwraps a query string, turning extractor rejections into API errors.
fn parse_query<T>(correlation_id: Uuid, query: Result<Query<T>, QueryRejection>) -> Result<T, ApiErrorResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

fn start_request(route: &'static str) -> Uuid {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, route = route, "Processing request");
    correlation_id
}

// --- Read-side aggregates ---------------------------------------------------

async fn dashboard_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /dashboard");
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    let config = state.config();
    let summary = snapshot.dashboard(&config.payroll_policy(), config.coverage_window());
    info!(
        correlation_id = %correlation_id,
        total_employees = summary.total_employees,
        total_shifts = summary.total_shifts,
        total_monthly_cost = %summary.total_monthly_cost,
        "Dashboard computed"
    );
    Ok(json_response(StatusCode::OK, &summary))
}

async fn coverage_handler(
    State(state): State<AppState>,
    filter: Result<Query<ShiftFilter>, QueryRejection>,
) -> ApiResult {
    let correlation_id = start_request("GET /coverage");
    let filter = parse_query(correlation_id, filter)?;
    let start_time = Instant::now();
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    let report = snapshot.coverage(&filter, state.config().coverage_window());
    info!(
        correlation_id = %correlation_id,
        critical_hours = report.critical_hours,
        empty_hours = report.empty_hours,
        duration_us = start_time.elapsed().as_micros(),
        "Coverage computed"
    );
    Ok(json_response(StatusCode::OK, &report))
}

async fn coverage_cell_handler(
    State(state): State<AppState>,
    Path((day, hour)): Path<(String, String)>,
) -> ApiResult {
    let correlation_id = start_request("GET /coverage/:day/:hour");
    let day = Weekday::parse(&day).ok_or_else(|| {
        ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            format!("Unknown weekday '{}'", day),
            "day",
        ))
    })?;
    let hour = hour.parse::<u32>().ok().filter(|h| *h < 24).ok_or_else(|| {
        ApiErrorResponse::bad_request(ApiError::with_details(
            "VALIDATION_ERROR",
            format!("Hour must be between 0 and 23, got '{}'", hour),
            "hour",
        ))
    })?;
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &snapshot.working_at(day, hour)))
}

async fn payroll_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /payroll");
    let start_time = Instant::now();
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    let projection = snapshot.payroll(&state.config().payroll_policy());
    if !projection.warnings.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            warnings = projection.warnings.len(),
            "Payroll projection has data gaps"
        );
    }
    info!(
        correlation_id = %correlation_id,
        employees = projection.lines.len(),
        total_monthly_cost = %projection.total_monthly_cost,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll projected"
    );
    Ok(json_response(StatusCode::OK, &projection))
}

async fn financial_handler(
    State(state): State<AppState>,
    query: Result<Query<FinancialQuery>, QueryRejection>,
) -> ApiResult {
    let correlation_id = start_request("GET /financial");
    let query = parse_query(correlation_id, query)?;
    let ticket = query
        .ticket
        .unwrap_or_else(|| state.config().default_ticket_price());
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    let summary = snapshot.financial(&state.config().payroll_policy(), ticket);
    info!(
        correlation_id = %correlation_id,
        total_monthly_cost = %summary.total_monthly_cost,
        break_even_customers = ?summary.break_even_customers,
        "Financial summary computed"
    );
    Ok(json_response(StatusCode::OK, &summary))
}

async fn weekly_report_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /reports/weekly");
    let snapshot = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &snapshot.weekly_report()))
}

// --- Employees --------------------------------------------------------------

async fn list_employees(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /employees");
    let employees = state
        .roster()
        .list_employees()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &employees))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /employees");
    let employee = parse_json(correlation_id, payload)?;
    let created = state
        .roster()
        .create_employee(employee)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &created))
}

async fn get_employee(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("GET /employees/:id");
    let employee = state
        .roster()
        .get_employee(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    let weekly = state
        .roster()
        .snapshot()
        .map_err(|e| engine_failure(correlation_id, e))?
        .employee_line(&id, &state.config().payroll_policy());
    Ok(json_response(StatusCode::OK, &EmployeeDetail { employee, weekly }))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeeUpdate>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("PATCH /employees/:id");
    let update = parse_json(correlation_id, payload)?;
    let updated = state
        .roster()
        .update_employee(&id, update)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &updated))
}

async fn delete_employee(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("DELETE /employees/:id");
    state
        .roster()
        .delete_employee(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}

async fn employee_history(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("GET /employees/:id/history");
    let history = state
        .roster()
        .employee_history(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &history))
}

async fn list_attachments(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("GET /employees/:id/attachments");
    let attachments = state
        .roster()
        .list_attachments(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &attachments))
}

async fn add_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Attachment>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /employees/:id/attachments");
    let attachment = parse_json(correlation_id, payload)?;
    let stored = state
        .roster()
        .add_attachment(&id, attachment)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &stored))
}

async fn delete_attachment(
    State(state): State<AppState>,
    Path((id, attachment_id)): Path<(String, String)>,
) -> ApiResult {
    let correlation_id = start_request("DELETE /employees/:id/attachments/:attachment_id");
    state
        .roster()
        .delete_attachment(&id, &attachment_id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}

async fn schedule_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<DraftQuery>, QueryRejection>,
) -> ApiResult {
    let correlation_id = start_request("GET /employees/:id/schedule-draft");
    let query = parse_query(correlation_id, query)?;
    let scope = match query.area.as_deref().map(str::trim) {
        Some(area) if !area.is_empty() => DraftScope::Area(area),
        _ => DraftScope::AllAreas,
    };
    let draft = state
        .roster()
        .schedule_draft(&id, scope)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &draft))
}

// --- Schedules --------------------------------------------------------------

async fn list_schedules(
    State(state): State<AppState>,
    filter: Result<Query<ShiftFilter>, QueryRejection>,
) -> ApiResult {
    let correlation_id = start_request("GET /schedules");
    let filter = parse_query(correlation_id, filter)?;
    let shifts = state
        .roster()
        .list_shifts(&filter)
        .map_err(|e| engine_failure(correlation_id, e))?;
    info!(correlation_id = %correlation_id, shifts = shifts.len(), "Listed shifts");
    Ok(json_response(StatusCode::OK, &shifts))
}

async fn save_schedule(
    State(state): State<AppState>,
    payload: Result<Json<ScheduleDraft>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /schedules");
    let draft = parse_json(correlation_id, payload)?;
    let result = state
        .roster()
        .save_schedule(draft)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &result))
}

async fn delete_schedule(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("DELETE /schedules/:id");
    state
        .roster()
        .delete_shift(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}

async fn bulk_delete_schedules(
    State(state): State<AppState>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /schedules/bulk-delete");
    let request = parse_json(correlation_id, payload)?;
    let removed = state
        .roster()
        .delete_shifts(&request.ids)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &BulkDeleteResponse { removed }))
}

// --- Operational costs ------------------------------------------------------

async fn list_operational_costs(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /operational-costs");
    let costs = state
        .roster()
        .list_operational_costs()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &costs))
}

async fn create_operational_cost(
    State(state): State<AppState>,
    payload: Result<Json<OperationalCost>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /operational-costs");
    let cost = parse_json(correlation_id, payload)?;
    let created = state
        .roster()
        .create_operational_cost(cost)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &created))
}

async fn update_operational_cost(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<OperationalCostUpdate>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("PATCH /operational-costs/:id");
    let update = parse_json(correlation_id, payload)?;
    let updated = state
        .roster()
        .update_operational_cost(&id, update)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &updated))
}

async fn delete_operational_cost(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("DELETE /operational-costs/:id");
    state
        .roster()
        .delete_operational_cost(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}

// --- Vocabularies -----------------------------------------------------------

fn vocabulary_list(state: &AppState, kind: VocabularyKind, correlation_id: Uuid) -> ApiResult {
    let names = state
        .roster()
        .list_vocabulary(kind)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &names))
}

fn vocabulary_add(
    state: &AppState,
    kind: VocabularyKind,
    correlation_id: Uuid,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    let request = parse_json(correlation_id, payload)?;
    let name = state
        .roster()
        .add_vocabulary(kind, &request.name)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &VocabularyRequest { name }))
}

fn vocabulary_rename(
    state: &AppState,
    kind: VocabularyKind,
    correlation_id: Uuid,
    from: &str,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    let request = parse_json(correlation_id, payload)?;
    let outcome = state
        .roster()
        .rename_vocabulary(kind, from, &request.name)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &outcome))
}

fn vocabulary_delete(state: &AppState, kind: VocabularyKind, correlation_id: Uuid, name: &str) -> ApiResult {
    state
        .roster()
        .delete_vocabulary(kind, name)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}

async fn list_roles(State(state): State<AppState>) -> ApiResult {
    vocabulary_list(&state, VocabularyKind::Role, start_request("GET /roles"))
}

async fn add_role(
    State(state): State<AppState>,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    vocabulary_add(&state, VocabularyKind::Role, start_request("POST /roles"), payload)
}

async fn rename_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    vocabulary_rename(&state, VocabularyKind::Role, start_request("PUT /roles/:name"), &name, payload)
}

async fn delete_role(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    vocabulary_delete(&state, VocabularyKind::Role, start_request("DELETE /roles/:name"), &name)
}

async fn list_areas(State(state): State<AppState>) -> ApiResult {
    vocabulary_list(&state, VocabularyKind::Area, start_request("GET /areas"))
}

async fn add_area(
    State(state): State<AppState>,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    vocabulary_add(&state, VocabularyKind::Area, start_request("POST /areas"), payload)
}

async fn rename_area(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<VocabularyRequest>, JsonRejection>,
) -> ApiResult {
    vocabulary_rename(&state, VocabularyKind::Area, start_request("PUT /areas/:name"), &name, payload)
}

async fn delete_area(State(state): State<AppState>, Path(name): Path<String>) -> ApiResult {
    vocabulary_delete(&state, VocabularyKind::Area, start_request("DELETE /areas/:name"), &name)
}

// --- Settings and users -----------------------------------------------------

async fn get_business_hours(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /settings/business-hours");
    let hours = state
        .roster()
        .business_hours()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &hours))
}

async fn set_business_hours(
    State(state): State<AppState>,
    payload: Result<Json<BusinessHours>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("PUT /settings/business-hours");
    let hours = parse_json(correlation_id, payload)?;
    let saved = state
        .roster()
        .set_business_hours(hours)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &saved))
}

async fn list_users(State(state): State<AppState>) -> ApiResult {
    let correlation_id = start_request("GET /users");
    let users = state
        .roster()
        .list_users()
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::OK, &users))
}

async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserProfile>, JsonRejection>,
) -> ApiResult {
    let correlation_id = start_request("POST /users");
    let user = parse_json(correlation_id, payload)?;
    let created = state
        .roster()
        .create_user(user)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(json_response(StatusCode::CREATED, &created))
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let correlation_id = start_request("DELETE /users/:id");
    state
        .roster()
        .delete_user(&id)
        .map_err(|e| engine_failure(correlation_id, e))?;
    Ok(no_content())
}
