use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use caredesk::api::{start_server, ApiContext};
use caredesk::{auth, config, db, state::AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    if let Err(e) = run().await {
        tracing::error!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = config::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    // Opening the database runs any pending migrations.
    let db_path = config::db_path();
    let conn = db::open_database(&db_path)?;

    // Idempotent bootstrap: make sure an admin login exists.
    let admin_email = config::admin_email();
    if auth::seed_admin(&conn, &admin_email, &config::admin_password())? {
        tracing::info!(email = %admin_email, "seeded bootstrap admin");
    }
    drop(conn);

    let ctx = ApiContext::new(Arc::new(AppState::new(db_path)));
    let addr = config::bind_addr().parse()?;
    let mut server = start_server(ctx, addr).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    server.shutdown();
    server.join().await;
    Ok(())
}
