//! Utilities for model_sync
//!
//! This module provides utility functions used across the library.

pub mod logging;
pub mod naming;

// Re-export key utility functions
pub use naming::{camel_to_underscore, pascal_to_hyphen, pascal_to_underscore, underscore_to_pascal};
