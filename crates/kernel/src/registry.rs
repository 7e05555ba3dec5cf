use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module, SchemaStatement};

/// Module registry owning every module mounted by the service
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        tracing::debug!(module = module.name(), "registering module");
        self.modules.push(module);
    }

    /// Get all registered modules in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Initialize modules in registration order
    pub async fn init_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Start modules in registration order
    pub async fn start_modules(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("starting {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop modules in reverse registration order
    pub async fn stop_modules(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Collect schema statements from all modules.
    ///
    /// Sorted by module name; statements keep the order their module returned them in.
    pub fn collect_schema(&self) -> Vec<(String, SchemaStatement)> {
        let mut statements = Vec::new();

        for module in &self.modules {
            for statement in module.schema() {
                statements.push((module.name().to_string(), statement));
            }
        }

        // stable sort
        statements.sort_by(|a, b| a.0.cmp(&b.0));

        statements
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::sync::Mutex;

    struct TestModule {
        name: &'static str,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl TestModule {
        fn record(&self, event: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event));
        }
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("init");
            Ok(())
        }

        fn schema(&self) -> Vec<SchemaStatement> {
            vec![
                SchemaStatement {
                    id: "002_second",
                    sql: "CREATE TABLE IF NOT EXISTS second (id INTEGER);",
                },
                SchemaStatement {
                    id: "001_first",
                    sql: "CREATE TABLE IF NOT EXISTS first (id INTEGER);",
                },
            ]
        }

        async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.record("start");
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.record("stop");
            Ok(())
        }
    }

    fn module(name: &'static str, events: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Module> {
        Arc::new(TestModule {
            name,
            events: events.clone(),
        })
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert!(registry.collect_schema().is_empty());
    }

    #[test]
    fn test_register_counts_modules() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register(module("books", &events));
        registry.register(module("authors", &events));

        assert_eq!(registry.module_count(), 2);
        assert_eq!(registry.modules()[0].name(), "books");
    }

    #[test]
    fn test_schema_collection_keeps_module_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        registry.register(module("zeta", &events));
        registry.register(module("alpha", &events));

        let ids: Vec<_> = registry
            .collect_schema()
            .into_iter()
            .map(|(module, statement)| format!("{}/{}", module, statement.id))
            .collect();

        assert_eq!(
            ids,
            vec![
                "alpha/002_second",
                "alpha/001_first",
                "zeta/002_second",
                "zeta/001_first",
            ]
        );
    }

    #[tokio::test]
    async fn test_module_lifecycle() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        registry.register(module("first", &events));
        registry.register(module("second", &events));

        registry.init_modules(&ctx).await.unwrap();
        registry.start_modules(&ctx).await.unwrap();
        registry.stop_modules().await.unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "first:init",
                "second:init",
                "first:start",
                "second:start",
                "second:stop",
                "first:stop",
            ]
        );
    }
}
