//! Bookstore application library
//!
//! Catalog modules mounted by the `bookstore-app` binary.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
