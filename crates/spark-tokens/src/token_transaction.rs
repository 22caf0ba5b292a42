use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use token_hasher::ValidationError;

use crate::{
    spark_hash::SparkHash,
    token_output::{TokenOutput, TokenOutputToSpend},
};

/// The maximum size of a token name in bytes. V0 hashes the name
/// zero-padded to this width; V1 hashes the raw UTF-8 bytes.
pub const MAX_TOKEN_NAME_SIZE: usize = 20;

/// The maximum size of a token ticker in bytes.
pub const MAX_TOKEN_TICKER_SIZE: usize = 6;

/// The exact size of the max supply field in bytes.
pub const MAX_SUPPLY_SIZE: usize = 16;

/// Represents a version of a token transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenTransactionVersion {
    /// Legacy wire format: fixed-width padded strings, no framing leaves.
    V0,

    /// Current wire format: version/type framing, length-prefixed
    /// collections, zero-filled fixed-width optional fields.
    V1,
}

impl TokenTransactionVersion {
    /// Serializes the version to its 4-byte big-endian wire form
    pub fn bytes(&self) -> [u8; 4] {
        self.as_u32().to_be_bytes()
    }

    /// Converts the version to u32
    pub fn as_u32(&self) -> u32 {
        match self {
            TokenTransactionVersion::V0 => 0u32,
            TokenTransactionVersion::V1 => 1u32,
        }
    }
}

impl Display for TokenTransactionVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenTransactionVersion::V0 => write!(f, "V0"),
            TokenTransactionVersion::V1 => write!(f, "V1"),
        }
    }
}

impl TryFrom<u32> for TokenTransactionVersion {
    type Error = ValidationError;

    fn try_from(version: u32) -> Result<Self, Self::Error> {
        match version {
            0 => Ok(TokenTransactionVersion::V0),
            1 => Ok(TokenTransactionVersion::V1),
            other => Err(ValidationError::UnsupportedVersion { version: other }),
        }
    }
}

/// The operation kind of a token transaction, derived from the populated
/// input variant. Hashed by V1 as its own leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenTransactionType {
    /// Defines a token's metadata.
    Create,

    /// Issues new supply.
    Mint,

    /// Moves existing supply.
    Transfer,
}

impl TokenTransactionType {
    /// Converts the transaction type to its wire number
    pub fn as_u32(&self) -> u32 {
        match self {
            TokenTransactionType::Create => 1u32,
            TokenTransactionType::Mint => 2u32,
            TokenTransactionType::Transfer => 3u32,
        }
    }

    /// Serializes the transaction type to its 4-byte big-endian wire form
    pub fn bytes(&self) -> [u8; 4] {
        self.as_u32().to_be_bytes()
    }
}

impl From<&TokenTransactionInput> for TokenTransactionType {
    fn from(input: &TokenTransactionInput) -> Self {
        match input {
            TokenTransactionInput::Mint(..) => TokenTransactionType::Mint,
            TokenTransactionInput::Transfer(..) => TokenTransactionType::Transfer,
            TokenTransactionInput::Create(..) => TokenTransactionType::Create,
        }
    }
}

/// The network a token transaction commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// No network declared.
    Unspecified,
    /// Bitcoin mainnet.
    Mainnet,
    /// Regtest.
    Regtest,
    /// Testnet.
    Testnet,
    /// Signet.
    Signet,
}

impl Network {
    /// Converts the network to its wire number
    pub fn as_u32(&self) -> u32 {
        match self {
            Network::Unspecified => 0u32,
            Network::Mainnet => 1u32,
            Network::Regtest => 2u32,
            Network::Testnet => 3u32,
            Network::Signet => 4u32,
        }
    }

    /// Serializes the network to its 4-byte big-endian wire form
    pub fn bytes(&self) -> [u8; 4] {
        self.as_u32().to_be_bytes()
    }

    /// Parses a wire number into a network
    pub fn from_number(value: u32) -> Option<Self> {
        match value {
            0 => Some(Network::Unspecified),
            1 => Some(Network::Mainnet),
            2 => Some(Network::Regtest),
            3 => Some(Network::Testnet),
            4 => Some(Network::Signet),
            _ => None,
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Unspecified => write!(f, "Unspecified"),
            Network::Mainnet => write!(f, "Mainnet"),
            Network::Regtest => write!(f, "Regtest"),
            Network::Testnet => write!(f, "Testnet"),
            Network::Signet => write!(f, "Signet"),
        }
    }
}

/// Represents a Spark token transaction.
///
/// This struct contains the input variant (mint, transfer or create), the
/// outputs to create, the operator identity public keys, and the network
/// information. It is an immutable value record: the hashers only read it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransaction {
    /// The declared wire version; selects the V0 or V1 hashing rules.
    pub version: TokenTransactionVersion,

    /// The input variant of the token transaction.
    pub token_inputs: TokenTransactionInput,

    /// The outputs to create. May be empty only for create transactions.
    pub token_outputs: Vec<TokenOutput>,

    /// The operator identity public keys, each a compressed public key.
    /// Sorted before hashing, so enumeration order does not matter.
    pub spark_operator_identity_public_keys: Vec<Vec<u8>>,

    /// The network the transaction commits to.
    pub network: Network,

    /// When the client created the transaction, in epoch milliseconds.
    /// Required by the V1 hasher.
    pub client_created_timestamp: Option<u64>,

    /// Server-set expiry time in epoch milliseconds. Committed by V1 final
    /// hashes only, truncated to whole seconds.
    pub expiry_time: Option<u64>,
}

impl TokenTransaction {
    /// Computes the final digest, the message operators co-sign.
    pub fn hash(&self) -> Result<SparkHash, ValidationError> {
        SparkHash::hash_token_transaction(self, false)
    }

    /// Computes the partial digest available before operator coordination
    /// assigns output ids, revocation commitments, bond and locktime terms.
    pub fn partial_hash(&self) -> Result<SparkHash, ValidationError> {
        SparkHash::hash_token_transaction(self, true)
    }
}

/// Represents the input variant of a token transaction.
///
/// Exactly one variant is populated per transaction; the hashers match
/// exhaustively so a new variant cannot be added without updating both
/// versions' rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenTransactionInput {
    /// Represents a mint transaction.
    Mint(TokenMintInput),

    /// Represents a transfer transaction.
    Transfer(TokenTransferInput),

    /// Represents a create(announce) transaction.
    Create(TokenCreateInput),
}

/// Represents a mint transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMintInput {
    /// The public key of the issuer of the token.
    pub issuer_public_key: Vec<u8>,

    /// The timestamp a V0-style mint carries itself, in epoch milliseconds.
    /// When absent, the V0 hasher falls back to the transaction-level
    /// client timestamp.
    pub issuer_provided_timestamp: Option<u64>,

    /// The token identifier. (None for V0; V1 hashes 32 zero bytes when
    /// absent)
    pub token_identifier: Option<[u8; 32]>,
}

/// Represents a transfer transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferInput {
    /// The previously created outputs being spent. Never empty.
    pub outputs_to_spend: Vec<TokenOutputToSpend>,
}

/// Represents a create transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCreateInput {
    /// The issuer public key
    pub issuer_public_key: Vec<u8>,

    /// The token name, 1 to [`MAX_TOKEN_NAME_SIZE`] UTF-8 bytes
    pub token_name: String,

    /// The token ticker, 1 to [`MAX_TOKEN_TICKER_SIZE`] UTF-8 bytes
    pub token_ticker: String,

    /// The decimals
    pub decimals: u32,

    /// The max supply, exactly [`MAX_SUPPLY_SIZE`] bytes
    pub max_supply: Vec<u8>,

    /// The flag represents whether the token can be frozen
    pub is_freezable: bool,

    /// The creation entity public key. Committed by final hashes only.
    pub creation_entity_public_key: Option<Vec<u8>>,
}
