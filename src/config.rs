use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "caredesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Address the API server binds to unless `CAREDESK_ADDR` overrides it.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "caredesk=info,tower_http=warn"
}

/// Get the application data directory (`~/.caredesk/`, overridable via
/// `CAREDESK_DATA_DIR` for containerised deployments).
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CAREDESK_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".caredesk")
}

/// Path of the SQLite database file.
pub fn db_path() -> PathBuf {
    data_dir().join("caredesk.db")
}

/// Bind address for the API server.
pub fn bind_addr() -> String {
    std::env::var("CAREDESK_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Credentials for the bootstrap admin user, seeded at startup if absent.
/// The defaults are development-only values.
pub fn admin_email() -> String {
    std::env::var("CAREDESK_ADMIN_EMAIL").unwrap_or_else(|_| "admin@caredesk.local".to_string())
}

pub fn admin_password() -> String {
    std::env::var("CAREDESK_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string())
}

/// Browser origins allowed by CORS. Comma-separated list in
/// `CAREDESK_ALLOWED_ORIGINS`; `None` means allow any origin (development).
pub fn allowed_origins() -> Option<Vec<String>> {
    let raw = std::env::var("CAREDESK_ALLOWED_ORIGINS").ok()?;
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if origins.is_empty() {
        None
    } else {
        Some(origins)
    }
}
