//! # SmartSched Core
//!
//! Shared building blocks for the SmartSched workspace: the error taxonomy
//! every crate reports through, and the TOML configuration loaded at startup.

pub mod config;
pub mod error;

pub use config::SmartSchedConfig;
pub use error::{Result, SchedError};
