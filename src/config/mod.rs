//! Configuration module for the expense tracker
//!
//! This module provides configuration management including:
//! - Backing file and audit log path resolution
//! - Display settings and defaults

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
