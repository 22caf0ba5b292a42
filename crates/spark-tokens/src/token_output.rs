use serde::{Deserialize, Serialize};

/// The maximum size of the big-endian token amount in bytes.
pub const MAX_TOKEN_AMOUNT_SIZE: usize = 16;

/// The size of a compressed token public key in bytes. V1 hashes this many
/// zero bytes when the key is absent.
pub const TOKEN_PUBLIC_KEY_SIZE: usize = 33;

/// The size of a token identifier in bytes. V1 hashes this many zero bytes
/// when the identifier is absent.
pub const TOKEN_IDENTIFIER_SIZE: usize = 32;

/// Represents a previously created token output being spent by a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOutputToSpend {
    /// The hash of the token transaction that created the output.
    /// Exactly 32 bytes.
    pub prev_token_transaction_hash: Vec<u8>,

    /// The output index within the creating token transaction.
    pub prev_token_transaction_vout: u32,
}

/// Represents a token output created by a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOutput {
    /// The identifier assigned to the output during coordination.
    /// Committed by final hashes only.
    pub id: Option<String>,

    /// The owner's public key.
    pub owner_public_key: Vec<u8>,

    /// The revocation commitment assigned during coordination. Committed by
    /// final hashes only.
    pub revocation_commitment: Option<Vec<u8>>,

    /// The withdrawal bond in sats. Committed by final hashes only.
    pub withdraw_bond_sats: u64,

    /// The relative block locktime for withdrawal. Committed by final
    /// hashes only.
    pub withdraw_relative_block_locktime: u64,

    /// The token public key. V0 hashes it only when present; V1 hashes
    /// [`TOKEN_PUBLIC_KEY_SIZE`] zero bytes when absent.
    pub token_public_key: Option<Vec<u8>>,

    /// The token identifier. V1 only; [`TOKEN_IDENTIFIER_SIZE`] zero bytes
    /// when absent.
    pub token_identifier: Option<[u8; TOKEN_IDENTIFIER_SIZE]>,

    /// The token amount as big-endian integer bytes,
    /// 1 to [`MAX_TOKEN_AMOUNT_SIZE`] bytes.
    pub token_amount: Vec<u8>,
}
