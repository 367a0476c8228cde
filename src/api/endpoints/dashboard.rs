//! Admin dashboard endpoint.

use axum::extract::State;
use axum::{Extension, Json};

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::dashboard::{self, DashboardStats};

/// `GET /api/dashboard/stats` — admin headline numbers.
pub async fn stats(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<DashboardStats>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(dashboard::dashboard_stats(&conn)?))
}
