//! # storsync Common Library
//!
//! Shared code for the storsync workspace:
//! - Error type used by configuration loading
//! - TOML configuration (endpoints, credentials, HTTP and logging settings)

pub mod config;
pub mod error;

pub use config::{EndpointConfig, HttpConfig, LoggingConfig, TomlConfig};
pub use error::{Error, Result};
