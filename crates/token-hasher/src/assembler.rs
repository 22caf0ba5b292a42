use bitcoin::hashes::{Hash, HashEngine, sha256, sha256::Hash as Sha256Hash};

/// Hashes a single leaf's byte content.
///
/// Every call constructs fresh hash state; there is no shared hashing
/// context between leaves.
pub fn leaf_hash(bytes: &[u8]) -> Sha256Hash {
    Sha256Hash::hash(bytes)
}

/// Accumulates an ordered sequence of 32-byte leaf digests and reduces them
/// to `SHA-256(leaf_0 || leaf_1 || .. || leaf_n)`.
///
/// Leaves are folded into the engine in push order. The order is part of the
/// wire format: callers must push leaves exactly in the order the protocol
/// defines for the structure being hashed.
pub struct LeafHasher {
    engine: sha256::HashEngine,
}

impl LeafHasher {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            engine: Sha256Hash::engine(),
        }
    }

    /// Appends one leaf digest. The leaf is not re-hashed.
    pub fn push(&mut self, leaf: Sha256Hash) {
        self.engine.input(leaf.as_byte_array());
    }

    /// Consumes the accumulator and returns the final digest over the
    /// concatenated leaves.
    pub fn finalize(self) -> Sha256Hash {
        Sha256Hash::from_engine(self.engine)
    }
}

impl Default for LeafHasher {
    fn default() -> Self {
        Self::new()
    }
}
