//! Authentication endpoints: login, logout, user registration.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::auth;
use crate::db;
use crate::models::{CreateUser, UserRole};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionInfo,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub doctor_id: Option<Uuid>,
}

/// `POST /api/auth/login` — verify credentials, issue a bearer token.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let user = auth::login(&conn, &request.email, &request.password)?;

    // A doctor login acts for its roster record; a stale link simply
    // leaves the session without a doctor id.
    let doctor_id = match (&user.role, &user.doctor_employee_id) {
        (UserRole::Doctor, Some(employee_id)) => {
            db::get_doctor_by_employee_id(&conn, employee_id)?.map(|doctor| doctor.id)
        }
        _ => None,
    };

    let session = SessionContext {
        user_id: user.id,
        email: user.email.clone(),
        role: user.role,
        doctor_id,
    };
    let token = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.issue(session)
    };
    tracing::info!(email = %user.email, "login");

    Ok(Json(LoginResponse {
        token,
        user: SessionInfo {
            id: user.id,
            email: user.email,
            role: user.role,
            doctor_id,
        },
    }))
}

/// `POST /api/auth/logout` — revoke the presented token.
pub async fn logout(
    State(ctx): State<ApiContext>,
    headers: axum::http::HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(token) = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.revoke(token);
    }
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}

/// `GET /api/auth/me` — the caller's own session.
pub async fn me(
    Extension(session): Extension<SessionContext>,
) -> Result<Json<SessionInfo>, ApiError> {
    Ok(Json(SessionInfo {
        id: session.user_id,
        email: session.email,
        role: session.role,
        doctor_id: session.doctor_id,
    }))
}

/// `POST /api/auth/register` — admin creates a back-office login.
pub async fn register(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<CreateUser>,
) -> Result<Json<SessionInfo>, ApiError> {
    require_admin(&session)?;

    let conn = ctx.state.open_db()?;
    let user = auth::register_user(&conn, &request)?;
    Ok(Json(SessionInfo {
        id: user.id,
        email: user.email,
        role: user.role,
        doctor_id: None,
    }))
}
