//! Patient directory endpoints — admin-only reads.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::directory;
use crate::models::{Page, Patient};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// `GET /api/patients` — paginated directory.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Patient>>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    let page = directory::list_patients(
        &conn,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10).clamp(1, 100),
    )?;
    Ok(Json(page))
}

/// `GET /api/patients/:mobile` — lookup by the natural key.
pub async fn get_one(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(mobile): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(directory::get_patient(&conn, &mobile)?))
}

/// `GET /api/patients/export/all` — the full directory.
pub async fn export(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(directory::list_all_for_export(&conn)?))
}
