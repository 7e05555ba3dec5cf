use anyhow::Context;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load bookstore settings")?;

    bookstore_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bookstore-app bootstrap starting"
    );

    let pool = bookstore_db::connect(&settings.database)
        .await
        .with_context(|| "failed to open database")?;

    let mut registry = ModuleRegistry::new();
    bookstore_app::register_all(&mut registry, pool.clone());
    tracing::info!(modules = registry.module_count(), "modules registered");

    bookstore_db::apply_schema(&pool, &registry.collect_schema())
        .await
        .with_context(|| "failed to apply schema")?;

    let ctx = InitCtx {
        settings: &settings,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("bookstore-app bootstrap complete");

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    pool.close().await;

    served
}
