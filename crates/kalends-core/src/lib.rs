//! Shared settings and error types for the kalends workspace.

pub mod config;
pub mod constants;
pub mod error;
