//! Data structures for Lala.
//!
//! This module contains the recursive hash tree and its supporting types:
//! path walking, visitor-based traversal and JSON interop.
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Children exclusively owned by their parent, so cycles cannot be built
//! - Absent keys and paths reported through `Option`, never through panics

pub mod hash_tree;

// Re-export common data structures
pub use hash_tree::{HashTree, HashTreeError, HashTreeResult, RenderOptions, Visitor};
