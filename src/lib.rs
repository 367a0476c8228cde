pub mod api; // REST surface: router, middleware, endpoints
pub mod auth; // Logins, password hashing, admin bootstrap
pub mod config;
pub mod content; // Site content: services, values, links, leadership, hero banner
pub mod dashboard; // Admin headline counters
pub mod db;
pub mod directory; // Patient directory projections
pub mod enquiry; // Enquiry lifecycle + assignment consistency
pub mod models;
pub mod roster; // Doctor roster management
pub mod state;
