//! Spark token transaction types and canonical hashing
//!
//! Every operator in the custody network recomputes these digests
//! independently; the leaf ordering and field encodings in this crate are
//! wire-format commitments shared with the other Spark implementations.

/// Operator-scoped signable payloads
pub mod operator_payload;
/// Canonical token transaction hashing
pub mod spark_hash;
/// Token output types
pub mod token_output;
/// Token transaction types
pub mod token_transaction;
