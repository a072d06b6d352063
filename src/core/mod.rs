//! # Core Module
//!
//! Core configuration for the CTF bot.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;

// Re-export commonly used items
pub use config::{Config, DEFAULT_CTF_CATEGORY_ID};
