use serde::{Deserialize, Serialize};
use token_hasher::{LeafHasher, ValidationError, codec, leaf_hash};

use crate::spark_hash::{SparkHash, TOKEN_TRANSACTION_HASH_SIZE};

/// Payload binding a final token transaction hash to a single operator's
/// identity.
///
/// A per-operator signing request is made over the hash of this payload
/// rather than over the bare transaction hash, so a request addressed to
/// one operator cannot be replayed against another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSpecificTokenTransactionSignablePayload {
    /// The final token transaction hash. Exactly 32 bytes when present.
    pub final_token_transaction_hash: Option<Vec<u8>>,

    /// The identity public key of the operator the request is addressed to.
    pub operator_identity_public_key: Vec<u8>,
}

impl OperatorSpecificTokenTransactionSignablePayload {
    /// Hashes the payload: a leaf over the final transaction hash when
    /// present, then a leaf over the operator identity key.
    pub fn hash(&self) -> Result<SparkHash, ValidationError> {
        let mut leaves = LeafHasher::new();

        if let Some(final_hash) = self.final_token_transaction_hash.as_deref() {
            leaves.push(leaf_hash(codec::exact_length(
                final_hash,
                TOKEN_TRANSACTION_HASH_SIZE,
                "final_token_transaction_hash",
            )?));
        }

        leaves.push(leaf_hash(codec::non_empty(
            &self.operator_identity_public_key,
            "operator_identity_public_key",
        )?));

        Ok(SparkHash(leaves.finalize()))
    }
}
