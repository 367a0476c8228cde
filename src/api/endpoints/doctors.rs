//! Doctor roster endpoints. Mutation is admin territory, except that a
//! doctor may manage their own profile and availability.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::enquiry;
use crate::models::{
    CreateDoctor, DayAvailability, Doctor, DoctorPatch, EnquiryView, Page, UserRole,
};
use crate::roster;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct BulkCreateRequest {
    pub doctors: Vec<CreateDoctor>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub availability: Vec<DayAvailability>,
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(format!("doctor {id} not found")))
}

/// Admin, or the doctor acting on their own roster record.
fn require_admin_or_self(session: &SessionContext, doctor_id: Uuid) -> Result<(), ApiError> {
    if session.role == UserRole::Admin || session.doctor_id == Some(doctor_id) {
        return Ok(());
    }
    Err(ApiError::Forbidden(
        "Not allowed to act on another doctor's record".into(),
    ))
}

/// `POST /api/doctors` — admin adds one doctor.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<CreateDoctor>,
) -> Result<Json<Doctor>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::create_doctor(&conn, &input)?))
}

/// `POST /api/doctors/bulk` — admin imports a parsed CSV batch.
pub async fn bulk_create(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<BulkCreateRequest>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::bulk_create_doctors(&conn, &request.doctors)?))
}

/// `GET /api/doctors` — paginated roster.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Doctor>>, ApiError> {
    let conn = ctx.state.open_db()?;
    let page = roster::list_doctors(
        &conn,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10).clamp(1, 100),
    )?;
    Ok(Json(page))
}

/// `GET /api/doctors/:id`
pub async fn get_one(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::get_doctor(&conn, id)?))
}

/// `GET /api/doctors/employee/:employee_id` — lookup by the human-facing code.
pub async fn get_by_employee_id(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    Path(employee_id): Path<String>,
) -> Result<Json<Doctor>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::get_doctor_by_employee_id(&conn, &employee_id)?))
}

/// `PATCH /api/doctors/:id` — admin, or the doctor's own profile. A doctor
/// cannot touch their employee code.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<DoctorPatch>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_id(&id)?;
    require_admin_or_self(&session, id)?;
    if session.role != UserRole::Admin && patch.employee_id.is_some() {
        return Err(ApiError::Forbidden(
            "Employee id can only be changed by an administrator".into(),
        ));
    }
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::update_doctor(&conn, id, &patch)?))
}

/// `PUT /api/doctors/:id/availability` — replace the weekly grid.
pub async fn replace_availability(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<Doctor>, ApiError> {
    let id = parse_id(&id)?;
    require_admin_or_self(&session, id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::replace_availability(
        &conn,
        id,
        &request.availability,
    )?))
}

/// `GET /api/doctors/:id/enquiries` — the doctor's assigned queue.
pub async fn assigned_enquiries(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<EnquiryView>>, ApiError> {
    let id = parse_id(&id)?;
    require_admin_or_self(&session, id)?;
    let conn = ctx.state.open_db()?;
    let page = enquiry::list_by_assignee(
        &conn,
        id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10).clamp(1, 100),
    )?;
    Ok(Json(page))
}

/// `DELETE /api/doctors/:id` — admin only.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id(&id)?;
    let conn = ctx.state.open_db()?;
    roster::delete_doctor(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Doctor deleted successfully" }),
    ))
}

/// `GET /api/doctors/export/all` — full roster, admin only.
pub async fn export(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<Doctor>>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(roster::list_all_for_export(&conn)?))
}
