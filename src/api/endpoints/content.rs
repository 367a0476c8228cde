//! Site content endpoints. Reads are public (the marketing site renders
//! from them); every mutation is admin-only.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use crate::api::endpoints::require_admin;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::content;
use crate::models::{
    CoreValue, CoreValuePatch, CreateCoreValue, CreateLeadershipMember, CreateService,
    CreateSocialMedia, HeroDiscount, LeadershipMember, LeadershipMemberPatch, Service,
    ServicePatch, SetHeroDiscount, SocialMedia, SocialMediaPatch,
};

fn parse_id(what: &'static str, id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::NotFound(format!("{what} {id} not found")))
}

// ── Services ────────────────────────────────────────────────

/// `GET /api/content/services` — public.
pub async fn list_services(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<Service>>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(content::list_services(&conn)?))
}

/// `POST /api/content/services` — admin.
pub async fn create_service(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<CreateService>,
) -> Result<Json<Service>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::create_service(&conn, &input)?))
}

/// `PATCH /api/content/services/:id` — admin.
pub async fn update_service(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<ServicePatch>,
) -> Result<Json<Service>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("service", &id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::update_service(&conn, id, &patch)?))
}

/// `DELETE /api/content/services/:id` — admin.
pub async fn delete_service(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("service", &id)?;
    let conn = ctx.state.open_db()?;
    content::delete_service(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Service deleted successfully" }),
    ))
}

// ── Core values ─────────────────────────────────────────────

/// `GET /api/content/core-values` — public.
pub async fn list_core_values(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<CoreValue>>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(content::list_core_values(&conn)?))
}

/// `POST /api/content/core-values` — admin.
pub async fn create_core_value(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<CreateCoreValue>,
) -> Result<Json<CoreValue>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::create_core_value(&conn, &input)?))
}

/// `PATCH /api/content/core-values/:id` — admin.
pub async fn update_core_value(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<CoreValuePatch>,
) -> Result<Json<CoreValue>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("core value", &id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::update_core_value(&conn, id, &patch)?))
}

/// `DELETE /api/content/core-values/:id` — admin.
pub async fn delete_core_value(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("core value", &id)?;
    let conn = ctx.state.open_db()?;
    content::delete_core_value(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Core value deleted successfully" }),
    ))
}

// ── Social media links ──────────────────────────────────────

/// `GET /api/content/social-media` — public.
pub async fn list_social_media(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<SocialMedia>>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(content::list_social_media(&conn)?))
}

/// `POST /api/content/social-media` — admin.
pub async fn create_social_media(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<CreateSocialMedia>,
) -> Result<Json<SocialMedia>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::create_social_media(&conn, &input)?))
}

/// `PATCH /api/content/social-media/:id` — admin.
pub async fn update_social_media(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<SocialMediaPatch>,
) -> Result<Json<SocialMedia>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("social media link", &id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::update_social_media(&conn, id, &patch)?))
}

/// `DELETE /api/content/social-media/:id` — admin.
pub async fn delete_social_media(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("social media link", &id)?;
    let conn = ctx.state.open_db()?;
    content::delete_social_media(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Social media link deleted successfully" }),
    ))
}

// ── Leadership team ─────────────────────────────────────────

/// `GET /api/content/leadership` — public.
pub async fn list_leadership_team(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<LeadershipMember>>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(content::list_leadership_team(&conn)?))
}

/// `POST /api/content/leadership` — admin.
pub async fn create_leadership_member(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<CreateLeadershipMember>,
) -> Result<Json<LeadershipMember>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::create_leadership_member(&conn, &input)?))
}

/// `PATCH /api/content/leadership/:id` — admin.
pub async fn update_leadership_member(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(patch): Json<LeadershipMemberPatch>,
) -> Result<Json<LeadershipMember>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("leadership member", &id)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::update_leadership_member(&conn, id, &patch)?))
}

/// `DELETE /api/content/leadership/:id` — admin.
pub async fn delete_leadership_member(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin(&session)?;
    let id = parse_id("leadership member", &id)?;
    let conn = ctx.state.open_db()?;
    content::delete_leadership_member(&conn, id)?;
    Ok(Json(
        serde_json::json!({ "message": "Leadership member deleted successfully" }),
    ))
}

// ── Hero discount ───────────────────────────────────────────

/// `GET /api/content/hero-discount` — public.
pub async fn get_hero_discount(
    State(ctx): State<ApiContext>,
) -> Result<Json<HeroDiscount>, ApiError> {
    let conn = ctx.state.open_db()?;
    Ok(Json(content::get_hero_discount(&conn)?))
}

/// `PUT /api/content/hero-discount` — admin.
pub async fn set_hero_discount(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    Json(input): Json<SetHeroDiscount>,
) -> Result<Json<HeroDiscount>, ApiError> {
    require_admin(&session)?;
    let conn = ctx.state.open_db()?;
    Ok(Json(content::set_hero_discount(&conn, &input)?))
}
