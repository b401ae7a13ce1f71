//! Test modules for Lala.
//!
//! This module contains the crate-internal test suites:
//! - Unit and property-based tests for the hash tree and its path operations
//! - Traversal contract tests using recording visitors
//! - Configuration loading and validation tests
//! - Error formatting and reporting tests
//! - Shared strategies and fixtures

pub mod error_tests;
pub mod traversal_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_strategy, owned, path_strategy, tree_strategy, TestFixture};
