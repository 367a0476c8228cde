//! API middleware stack.
//!
//! Public routes run behind the rate limiter only; everything else runs
//! behind the auth validator, which injects `SessionContext`.

pub mod auth;
pub mod rate;
