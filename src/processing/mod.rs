//! Feed generation pipeline logic.
//!
//! This module contains the per-run business logic:
//! - [`resolver`] - resolving one supernet into an allocation
//! - [`assemble`] - folding all configured supernets into a snapshot

mod assemble;
mod resolver;

// Re-export public functions
pub use assemble::assemble;
pub use resolver::resolve;
