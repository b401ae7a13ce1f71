//! Lala Hash Tree Library
//!
//! This library contains a recursively nested hash tree, where every value
//! stored under a key is another tree of the same kind, together with the
//! configuration and error handling used by the `lala` command-line tool.
//!
//! # Architecture
//!
//! The library is designed with the following principles in mind:
//! - Exclusive ownership of every subtree, so cycles cannot be expressed
//! - A few canonical primitives (`add`, `ensure`, `resolve`, `traverse`)
//!   underneath every convenience operation
//! - Visitors that keep their own state, outside the tree
//! - Comprehensive error handling and propagation

// Re-export public modules
pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::{HashTree, HashTreeError, HashTreeResult, RenderOptions, Visitor};

/// Version information for Lala.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
