//! Token hasher
//!
//! Hashing primitives shared by every canonical token-transaction hashing
//! routine: single-leaf hashing, leaf accumulation into a final digest, and
//! the validating field encoders.

/// Leaf accumulation and final digest assembly
pub mod assembler;

/// Canonical field encodings with per-field validation
pub mod codec;

/// Errors
pub mod errors;

pub use assembler::{LeafHasher, leaf_hash};
pub use errors::ValidationError;
