use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Idempotent DDL statement a module needs before it can serve requests
#[derive(Debug, Clone)]
pub struct SchemaStatement {
    pub id: &'static str,
    pub sql: &'static str,
}

/// Contract every bookstore module implements
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context.
    /// Called during startup, after the schema has been applied.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes.
    /// Routes are mounted under `/api/{module_name}`.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return the OpenAPI fragment for this module as JSON.
    /// Paths are relative to the module mount point.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Return the schema statements this module relies on, in execution order
    fn schema(&self) -> Vec<SchemaStatement> {
        vec![]
    }

    /// Called once all modules are initialized
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
