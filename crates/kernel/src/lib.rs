//! Kernel of the bookstore service: layered settings, the module contract and
//! the registry that drives module lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, SchemaStatement};
pub use registry::ModuleRegistry;
