//! Session state, route guarding and their configuration

pub mod auth;
pub mod config;

pub use config::{AuthConfig, ConfigError};
