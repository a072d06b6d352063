//! # CTF Feature
//!
//! Provisioning and membership for named CTF groups. A CTF has no storage of
//! its own: it exists as a hoisted guild role plus a text channel restricted
//! to that role, both named after the CTF.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod workflow;

pub use workflow::{create_ctf, join_ctf, CreatedCtf, JoinOutcome};
