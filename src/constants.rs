// ABOUTME: System-wide constants and configuration values for Larder
// ABOUTME: Contains defaults and environment variable configuration helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable
//! configuration.

use std::env;

/// Service identity constants
pub mod service {
    /// Service name used in structured log output
    pub const SERVICE_NAME: &str = "larder";

    /// Service version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Default values used when environment variables are absent
pub mod defaults {
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:data/larder.db";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default environment name
    pub const ENVIRONMENT: &str = "development";
}

/// Operational limits
pub mod limits {
    /// Maximum attempts for the pivot selection compare-and-swap loop
    /// before the update is reported as a conflict
    pub const PIVOT_UPDATE_MAX_ATTEMPTS: u32 = 4;
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| defaults::LOG_LEVEL.into())
    }

    /// Get deployment environment name from environment or default
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| defaults::ENVIRONMENT.into())
    }
}
