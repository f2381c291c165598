//! Schema migrations for the pages table

use sqlx::SqlitePool;

/// Create the `pages` table if it does not exist.
///
/// Safe to run on every startup.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running wiki migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE CHECK (length(name) <= 255),
            content TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Wiki migrations complete");
    Ok(())
}
