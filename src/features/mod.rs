//! # Features Layer
//!
//! Feature modules implementing the bot's behavior.

pub mod ctf;

// Re-export feature items for convenient access
pub use ctf::{create_ctf, join_ctf, CreatedCtf, JoinOutcome};
