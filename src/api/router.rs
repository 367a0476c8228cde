//! API router.
//!
//! Two route groups nested under `/api/`:
//! - public: intake, login, health, and the content reads the marketing
//!   site renders from — rate-limited, no auth;
//! - protected: everything the admin and doctor portals use, behind the
//!   bearer-token middleware.
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); endpoint handlers use `State<ApiContext>` via `with_state`.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, patch, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config;

/// Build the full API router.
pub fn api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let public = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/enquiries", post(endpoints::enquiries::create))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/content/services", get(endpoints::content::list_services))
        .route(
            "/content/core-values",
            get(endpoints::content::list_core_values),
        )
        .route(
            "/content/social-media",
            get(endpoints::content::list_social_media),
        )
        .route(
            "/content/leadership",
            get(endpoints::content::list_leadership_team),
        )
        .route(
            "/content/hero-discount",
            get(endpoints::content::get_hero_discount),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::rate::limit))
        .layer(axum::Extension(ctx.clone()));

    let protected = Router::new()
        // Enquiries
        .route("/enquiries", get(endpoints::enquiries::list))
        .route(
            "/enquiries/export/all",
            get(endpoints::enquiries::export),
        )
        .route(
            "/enquiries/:id",
            get(endpoints::enquiries::get_one)
                .patch(endpoints::enquiries::update)
                .delete(endpoints::enquiries::delete),
        )
        // Doctors
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::create),
        )
        .route("/doctors/bulk", post(endpoints::doctors::bulk_create))
        .route("/doctors/export/all", get(endpoints::doctors::export))
        .route(
            "/doctors/employee/:employee_id",
            get(endpoints::doctors::get_by_employee_id),
        )
        .route(
            "/doctors/:id",
            get(endpoints::doctors::get_one)
                .patch(endpoints::doctors::update)
                .delete(endpoints::doctors::delete),
        )
        .route(
            "/doctors/:id/availability",
            put(endpoints::doctors::replace_availability),
        )
        .route(
            "/doctors/:id/enquiries",
            get(endpoints::doctors::assigned_enquiries),
        )
        // Patients
        .route("/patients", get(endpoints::patients::list))
        .route("/patients/export/all", get(endpoints::patients::export))
        .route("/patients/:mobile", get(endpoints::patients::get_one))
        // Dashboard
        .route("/dashboard/stats", get(endpoints::dashboard::stats))
        // Auth
        .route("/auth/logout", post(endpoints::auth::logout))
        .route("/auth/me", get(endpoints::auth::me))
        .route("/auth/register", post(endpoints::auth::register))
        // Content mutation
        .route(
            "/content/services",
            post(endpoints::content::create_service),
        )
        .route(
            "/content/services/:id",
            patch(endpoints::content::update_service)
                .delete(endpoints::content::delete_service),
        )
        .route(
            "/content/core-values",
            post(endpoints::content::create_core_value),
        )
        .route(
            "/content/core-values/:id",
            patch(endpoints::content::update_core_value)
                .delete(endpoints::content::delete_core_value),
        )
        .route(
            "/content/social-media",
            post(endpoints::content::create_social_media),
        )
        .route(
            "/content/social-media/:id",
            patch(endpoints::content::update_social_media)
                .delete(endpoints::content::delete_social_media),
        )
        .route(
            "/content/leadership",
            post(endpoints::content::create_leadership_member),
        )
        .route(
            "/content/leadership/:id",
            patch(endpoints::content::update_leadership_member)
                .delete(endpoints::content::delete_leadership_member),
        )
        .route(
            "/content/hero-discount",
            put(endpoints::content::set_hero_discount),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(axum::Extension(ctx));

    Router::new()
        .nest("/api", public)
        .nest("/api", protected)
        .layer(cors_layer())
}

/// CORS for the browser frontend. A configured origin list restricts it;
/// otherwise any origin is allowed (development).
fn cors_layer() -> CorsLayer {
    let origins = config::allowed_origins().map(|list| {
        list.iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect::<Vec<_>>()
    });

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any);

    match origins {
        Some(list) if !list.is_empty() => layer.allow_origin(AllowOrigin::list(list)),
        _ => layer.allow_origin(Any),
    }
}
