//! # Albumeo Common Library
//!
//! Shared code for the Albumeo crates:
//! - Error and result types
//! - TOML configuration model and config-file resolution
//! - Standard User-Agent string for outbound HTTP clients

pub mod config;
pub mod error;

pub use config::TomlConfig;
pub use error::{Error, Result};
