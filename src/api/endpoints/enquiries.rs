//! Enquiry endpoints: public intake plus the role-gated back-office
//! listing, update, delete, and export surfaces.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::enquiry;
use crate::models::{
    CreateEnquiry, EnquiryPatch, EnquiryStatus, EnquiryView, Page, UserRole,
};

#[derive(Debug, Deserialize)]
pub struct EnquiryListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<EnquiryStatus>,
    pub assignee: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub status: Option<EnquiryStatus>,
    pub assignee: Option<Uuid>,
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    // A malformed id cannot name an existing enquiry.
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(format!("enquiry {id} not found")))
}

/// `POST /api/enquiries` — public intake from the consultation form.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<CreateEnquiry>,
) -> Result<Json<EnquiryView>, ApiError> {
    let conn = ctx.state.open_db()?;
    let view = enquiry::create_enquiry(&conn, &input)?;
    Ok(Json(view))
}

/// `GET /api/enquiries` — paginated listing with status/assignee filters.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    Query(query): Query<EnquiryListQuery>,
) -> Result<Json<Page<EnquiryView>>, ApiError> {
    let conn = ctx.state.open_db()?;
    let page = enquiry::list_enquiries(
        &conn,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10).clamp(1, 100),
        query.status,
        query.assignee,
    )?;
    Ok(Json(page))
}

/// `GET /api/enquiries/:id`
pub async fn get_one(
    State(ctx): State<ApiContext>,
    Extension(_session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<EnquiryView>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(enquiry::get_enquiry(&conn, id)?))
}

/// `PATCH /api/enquiries/:id` — role-filtered merge patch.
///
/// An admin may patch anything. A doctor may only flip the status of an
/// enquiry currently assigned to them; the patch is rejected before the
/// core update sees it otherwise.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<EnquiryPatch>,
) -> Result<Json<EnquiryView>, ApiError> {
    let id = parse_id(&id)?;
    let conn = ctx.state.open_db()?;

    if session.role == UserRole::Doctor {
        if !patch.is_status_only() {
            return Err(ApiError::Forbidden(
                "Doctors may only update the enquiry status".into(),
            ));
        }
        let current = enquiry::get_enquiry(&conn, id)?;
        let owns = match (&current.assignee, session.doctor_id) {
            (Some(assignee), Some(doctor_id)) => assignee.id == doctor_id,
            _ => false,
        };
        if !owns {
            return Err(ApiError::Forbidden(
                "Enquiry is not assigned to this doctor".into(),
            ));
        }
    }

    Ok(Json(enquiry::update_enquiry(&conn, id, &patch)?))
}

/// `DELETE /api/enquiries/:id` — admin only.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id(&id)?;
    let conn = ctx.state.open_db()?;
    enquiry::delete_enquiry(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Enquiry deleted successfully" }),
    ))
}

/// `GET /api/enquiries/export/all` — the full filtered set, admin only.
pub async fn export(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<Vec<EnquiryView>>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(enquiry::list_all_for_export(
        &conn,
        query.status,
        query.assignee,
    )?))
}
