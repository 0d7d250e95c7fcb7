//! # Common Components
//!
//! Shared utilities used by the service binary and the HTTP layer.
//!
//! ## Modules
//!
//! - [`config`]: Configuration structures and TOML loading

pub mod config;

pub use config::{load_config, ServiceConfig};
