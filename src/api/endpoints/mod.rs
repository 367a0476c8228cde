//! API endpoint handlers.
//!
//! Each module corresponds to one back-office screen or public surface.
//! Handlers stay thin: open a connection, call the domain module, map
//! errors through `ApiError`.

pub mod auth;
pub mod content;
pub mod dashboard;
pub mod doctors;
pub mod enquiries;
pub mod health;
pub mod patients;

use crate::api::error::ApiError;
use crate::api::types::SessionContext;
use crate::models::UserRole;

/// Admin-only gate used by mutation handlers.
pub(crate) fn require_admin(session: &SessionContext) -> Result<(), ApiError> {
    if session.role != UserRole::Admin {
        return Err(ApiError::Forbidden("Administrator access required".into()));
    }
    Ok(())
}
