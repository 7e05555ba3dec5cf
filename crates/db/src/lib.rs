//! Database bootstrap: SQLite pool construction and schema application.

use std::str::FromStr;

use anyhow::Context;
use bookstore_kernel::{settings::DatabaseSettings, SchemaStatement};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open a connection pool for the configured database.
///
/// In-memory databases live only as long as their connection, so they are
/// pinned to a single connection that never idles out.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true);

    let pool_options = if settings.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to '{}'", settings.url))?;

    tracing::info!(
        target: "bookstore-db",
        url = %settings.url,
        in_memory = settings.is_in_memory(),
        "database pool ready"
    );

    Ok(pool)
}

/// Execute schema statements in the given order.
///
/// Statements are expected to be idempotent; they run on every startup.
pub async fn apply_schema(
    pool: &SqlitePool,
    statements: &[(String, SchemaStatement)],
) -> anyhow::Result<()> {
    for (module, statement) in statements {
        tracing::info!(
            target: "bookstore-db",
            module = %module,
            statement = statement.id,
            "applying schema statement"
        );

        sqlx::raw_sql(statement.sql)
            .execute(pool)
            .await
            .with_context(|| {
                format!(
                    "schema statement '{}' of module '{}' failed",
                    statement.id, module
                )
            })?;
    }

    Ok(())
}
