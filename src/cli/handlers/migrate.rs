use tracing::info;

use crate::config::Settings;
use crate::db;

/// Applies all pending database migrations and reports what ran.
pub async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    info!("Running pending migrations");

    let applied = db::run_pending_migrations(&settings.database.url).await?;

    if applied.is_empty() {
        info!("No pending migrations");
    } else {
        for version in &applied {
            info!(version = %version, "Applied migration");
        }
    }

    Ok(())
}
