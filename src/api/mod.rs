//! HTTP API layer.
//!
//! Exposes the domain modules as REST endpoints under `/api/`. Public
//! surfaces (intake, login, content reads) run behind the rate limiter;
//! everything else runs behind bearer-token auth.
//!
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::{ApiContext, SessionContext};
