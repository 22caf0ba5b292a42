use std::ops::Deref;

use bitcoin::hashes::{Hash, HashEngine, sha256, sha256::Hash as Sha256Hash};
use token_hasher::{LeafHasher, ValidationError, codec, leaf_hash};
use tracing::debug;

use crate::{
    token_output::{MAX_TOKEN_AMOUNT_SIZE, TOKEN_IDENTIFIER_SIZE, TOKEN_PUBLIC_KEY_SIZE, TokenOutput, TokenOutputToSpend},
    token_transaction::{
        MAX_SUPPLY_SIZE, MAX_TOKEN_NAME_SIZE, MAX_TOKEN_TICKER_SIZE, TokenCreateInput, TokenTransaction,
        TokenTransactionInput, TokenTransactionType, TokenTransactionVersion,
    },
};

/// The exact size of a token transaction hash in bytes.
pub const TOKEN_TRANSACTION_HASH_SIZE: usize = 32;

/// A canonical digest of a Spark token transaction.
///
/// Operators and clients compute this independently from the same
/// transaction record; it is the message the threshold signers sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SparkHash(pub Sha256Hash);

impl Deref for SparkHash {
    type Target = Sha256Hash;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Sha256Hash> for SparkHash {
    fn from(hash: Sha256Hash) -> Self {
        Self(hash)
    }
}

impl From<[u8; 32]> for SparkHash {
    fn from(value: [u8; 32]) -> Self {
        Self(Sha256Hash::from_byte_array(value))
    }
}

impl SparkHash {
    /// Creates a `SparkHash` from a byte array.
    ///
    /// # Arguments
    ///
    /// * `hash_bytes` - The byte array to create the `SparkHash` from.
    pub fn from_hash_bytes(hash_bytes: &[u8; 32]) -> Self {
        Self(Sha256Hash::from_byte_array(*hash_bytes))
    }

    /// Hashes a token transaction under its declared version's rules.
    ///
    /// # Arguments
    ///
    /// * `token_tx` - The token transaction to hash.
    /// * `is_partial_hash` - Whether to compute the partial digest, which
    ///   omits the fields assigned during operator coordination.
    ///
    /// # Returns
    ///
    /// A `SparkHash` representing the hash of the token transaction.
    pub fn hash_token_transaction(token_tx: &TokenTransaction, is_partial_hash: bool) -> Result<Self, ValidationError> {
        match token_tx.version {
            TokenTransactionVersion::V0 => Self::hash_token_transaction_v0(token_tx, is_partial_hash),
            TokenTransactionVersion::V1 => Self::hash_token_transaction_v1(token_tx, is_partial_hash),
        }
    }

    /// Hashes a token transaction under the legacy V0 wire format.
    ///
    /// V0 carries no framing leaves: the leaf sequence is the input leaves,
    /// one leaf per output, one leaf per sorted operator key, and the
    /// network leaf.
    pub fn hash_token_transaction_v0(
        token_tx: &TokenTransaction,
        is_partial_hash: bool,
    ) -> Result<Self, ValidationError> {
        debug!(version = %token_tx.version, is_partial_hash, outputs_count = token_tx.token_outputs.len(),
            "Starting token transaction hash calculation");

        let mut leaves = LeafHasher::new();

        match &token_tx.token_inputs {
            TokenTransactionInput::Transfer(transfer_input) => {
                if transfer_input.outputs_to_spend.is_empty() {
                    return Err(ValidationError::EmptyField {
                        field: "token_inputs.transfer_input.outputs_to_spend".to_owned(),
                    });
                }

                for (index, output) in transfer_input.outputs_to_spend.iter().enumerate() {
                    leaves.push(Self::hash_output_to_spend(output, index)?);
                }
            }
            TokenTransactionInput::Mint(mint_input) => {
                let mut hash_engine = Sha256Hash::engine();
                hash_engine.input(codec::non_empty(
                    &mint_input.issuer_public_key,
                    "token_inputs.mint_input.issuer_public_key",
                )?);

                // V0-style mint inputs carry their own timestamp; newer
                // records fall back to the transaction-level client
                // timestamp. A zero timestamp is omitted entirely.
                let timestamp = mint_input
                    .issuer_provided_timestamp
                    .unwrap_or_else(|| token_tx.client_created_timestamp.unwrap_or(0));
                if timestamp != 0 {
                    // Little-endian, unlike every other integer in the
                    // scheme. Wire commitment shared with the other
                    // implementations.
                    hash_engine.input(&timestamp.to_le_bytes());
                }

                leaves.push(Sha256Hash::from_engine(hash_engine));
            }
            TokenTransactionInput::Create(create_input) => {
                Self::push_create_input_leaves(&mut leaves, create_input, is_partial_hash, TokenTransactionVersion::V0)?;
            }
        }

        Self::check_outputs_not_empty(token_tx)?;
        for (index, output) in token_tx.token_outputs.iter().enumerate() {
            leaves.push(Self::hash_token_output_v0(output, index, is_partial_hash)?);
        }

        debug!("Hash spark operator identity public keys");
        for key in Self::sorted_operator_keys(&token_tx.spark_operator_identity_public_keys)? {
            leaves.push(leaf_hash(key));
        }

        leaves.push(leaf_hash(&token_tx.network.bytes()));

        debug!("Finished token transaction hash calculated successfully");
        Ok(Self(leaves.finalize()))
    }

    /// Hashes a token transaction under the current V1 wire format.
    ///
    /// V1 frames the V0 structure explicitly: version and transaction-type
    /// leaves up front, a 4-byte big-endian length leaf before every
    /// collection, zero-filled fixed-width optional fields, and trailing
    /// timestamp leaves. The client timestamp leaf is mandatory; the expiry
    /// leaf is committed by final hashes only.
    pub fn hash_token_transaction_v1(
        token_tx: &TokenTransaction,
        is_partial_hash: bool,
    ) -> Result<Self, ValidationError> {
        debug!(version = %token_tx.version, is_partial_hash, outputs_count = token_tx.token_outputs.len(),
            "Starting token transaction hash calculation");

        let mut leaves = LeafHasher::new();

        leaves.push(leaf_hash(&token_tx.version.bytes()));
        leaves.push(leaf_hash(&TokenTransactionType::from(&token_tx.token_inputs).bytes()));

        match &token_tx.token_inputs {
            TokenTransactionInput::Transfer(transfer_input) => {
                if transfer_input.outputs_to_spend.is_empty() {
                    return Err(ValidationError::EmptyField {
                        field: "token_inputs.transfer_input.outputs_to_spend".to_owned(),
                    });
                }

                let inputs_len = transfer_input.outputs_to_spend.len() as u32;
                leaves.push(leaf_hash(&inputs_len.to_be_bytes()));

                for (index, output) in transfer_input.outputs_to_spend.iter().enumerate() {
                    leaves.push(Self::hash_output_to_spend(output, index)?);
                }
            }
            TokenTransactionInput::Mint(mint_input) => {
                leaves.push(leaf_hash(codec::non_empty(
                    &mint_input.issuer_public_key,
                    "token_inputs.mint_input.issuer_public_key",
                )?));

                match &mint_input.token_identifier {
                    Some(identifier) => leaves.push(leaf_hash(identifier)),
                    None => leaves.push(leaf_hash(&[0u8; TOKEN_IDENTIFIER_SIZE])),
                }
            }
            TokenTransactionInput::Create(create_input) => {
                Self::push_create_input_leaves(&mut leaves, create_input, is_partial_hash, TokenTransactionVersion::V1)?;
            }
        }

        Self::check_outputs_not_empty(token_tx)?;

        let outputs_len = token_tx.token_outputs.len() as u32;
        leaves.push(leaf_hash(&outputs_len.to_be_bytes()));

        for (index, output) in token_tx.token_outputs.iter().enumerate() {
            leaves.push(Self::hash_token_output_v1(output, index, is_partial_hash)?);
        }

        debug!("Hash spark operator identity public keys");
        let sorted_keys = Self::sorted_operator_keys(&token_tx.spark_operator_identity_public_keys)?;

        let keys_len = sorted_keys.len() as u32;
        leaves.push(leaf_hash(&keys_len.to_be_bytes()));

        for key in sorted_keys {
            leaves.push(leaf_hash(key));
        }

        leaves.push(leaf_hash(&token_tx.network.bytes()));

        let client_created_timestamp =
            token_tx
                .client_created_timestamp
                .ok_or_else(|| ValidationError::MissingRequiredField {
                    field: "client_created_timestamp".to_owned(),
                })?;
        leaves.push(leaf_hash(&client_created_timestamp.to_be_bytes()));

        if !is_partial_hash {
            // The expiry leaf commits whole seconds while the client
            // timestamp stays in milliseconds. Both units are wire
            // commitments; do not unify them.
            let expiry_seconds = token_tx.expiry_time.map_or(0, |millis| millis / 1000);
            leaves.push(leaf_hash(&expiry_seconds.to_be_bytes()));
        }

        debug!("Finished token transaction hash calculated successfully");
        Ok(Self(leaves.finalize()))
    }

    /// Hashes one spent output of a transfer.
    pub fn hash_output_to_spend(output: &TokenOutputToSpend, index: usize) -> Result<Sha256Hash, ValidationError> {
        let mut hash_engine = Sha256Hash::engine();

        hash_engine.input(codec::exact_length(
            &output.prev_token_transaction_hash,
            TOKEN_TRANSACTION_HASH_SIZE,
            &format!("token_inputs.transfer_input.outputs_to_spend[{index}].prev_token_transaction_hash"),
        )?);
        hash_engine.input(&output.prev_token_transaction_vout.to_be_bytes());

        Ok(Sha256Hash::from_engine(hash_engine))
    }

    /// Hashes one created output under the V0 rules.
    ///
    /// The token public key is folded in only when present; there is no
    /// zero-filling in V0.
    pub fn hash_token_output_v0(
        output: &TokenOutput,
        index: usize,
        is_partial_hash: bool,
    ) -> Result<Sha256Hash, ValidationError> {
        let mut hash_engine = Sha256Hash::engine();

        Self::push_output_prefix(&mut hash_engine, output, index, is_partial_hash)?;

        if let Some(token_public_key) = output.token_public_key.as_deref() {
            hash_engine.input(codec::non_empty(
                token_public_key,
                &format!("token_outputs[{index}].token_public_key"),
            )?);
        }

        hash_engine.input(codec::bounded(
            &output.token_amount,
            MAX_TOKEN_AMOUNT_SIZE,
            &format!("token_outputs[{index}].token_amount"),
        )?);

        Ok(Sha256Hash::from_engine(hash_engine))
    }

    /// Hashes one created output under the V1 rules.
    ///
    /// The token public key and token identifier are fixed-width fields,
    /// zero-filled when absent, so their presence never shifts later bytes.
    pub fn hash_token_output_v1(
        output: &TokenOutput,
        index: usize,
        is_partial_hash: bool,
    ) -> Result<Sha256Hash, ValidationError> {
        let mut hash_engine = Sha256Hash::engine();

        Self::push_output_prefix(&mut hash_engine, output, index, is_partial_hash)?;

        match output.token_public_key.as_deref().filter(|key| !key.is_empty()) {
            Some(token_public_key) => hash_engine.input(token_public_key),
            None => hash_engine.input(&[0u8; TOKEN_PUBLIC_KEY_SIZE]),
        }

        match &output.token_identifier {
            Some(identifier) => hash_engine.input(identifier),
            None => hash_engine.input(&[0u8; TOKEN_IDENTIFIER_SIZE]),
        }

        hash_engine.input(codec::bounded(
            &output.token_amount,
            MAX_TOKEN_AMOUNT_SIZE,
            &format!("token_outputs[{index}].token_amount"),
        )?);

        Ok(Sha256Hash::from_engine(hash_engine))
    }

    /// Folds in the output fields common to V0 and V1: the optional id, the
    /// owner key, and the coordination-assigned fields a final hash commits
    /// to.
    fn push_output_prefix(
        hash_engine: &mut sha256::HashEngine,
        output: &TokenOutput,
        index: usize,
        is_partial_hash: bool,
    ) -> Result<(), ValidationError> {
        if !is_partial_hash {
            if let Some(id) = output.id.as_deref().filter(|id| !id.is_empty()) {
                hash_engine.input(id.as_bytes());
            }
        }

        hash_engine.input(codec::non_empty(
            &output.owner_public_key,
            &format!("token_outputs[{index}].owner_public_key"),
        )?);

        if !is_partial_hash {
            if let Some(commitment) = output.revocation_commitment.as_deref() {
                hash_engine.input(codec::non_empty(
                    commitment,
                    &format!("token_outputs[{index}].revocation_commitment"),
                )?);
            }

            hash_engine.input(&output.withdraw_bond_sats.to_be_bytes());
            hash_engine.input(&output.withdraw_relative_block_locktime.to_be_bytes());
        }

        Ok(())
    }

    /// Pushes the create-input leaves shared by both versions: issuer key,
    /// name, ticker, decimals, max supply, freezable flag, and the creation
    /// entity leaf.
    ///
    /// V0 hashes the name and ticker zero-padded to their fixed widths; V1
    /// hashes the raw UTF-8 bytes.
    fn push_create_input_leaves(
        leaves: &mut LeafHasher,
        create_input: &TokenCreateInput,
        is_partial_hash: bool,
        version: TokenTransactionVersion,
    ) -> Result<(), ValidationError> {
        leaves.push(leaf_hash(codec::non_empty(
            &create_input.issuer_public_key,
            "token_inputs.create_input.issuer_public_key",
        )?));

        match version {
            TokenTransactionVersion::V0 => {
                leaves.push(leaf_hash(&codec::zero_padded(
                    create_input.token_name.as_bytes(),
                    MAX_TOKEN_NAME_SIZE,
                    "token_inputs.create_input.token_name",
                )?));
                leaves.push(leaf_hash(&codec::zero_padded(
                    create_input.token_ticker.as_bytes(),
                    MAX_TOKEN_TICKER_SIZE,
                    "token_inputs.create_input.token_ticker",
                )?));
            }
            TokenTransactionVersion::V1 => {
                leaves.push(leaf_hash(codec::bounded(
                    create_input.token_name.as_bytes(),
                    MAX_TOKEN_NAME_SIZE,
                    "token_inputs.create_input.token_name",
                )?));
                leaves.push(leaf_hash(codec::bounded(
                    create_input.token_ticker.as_bytes(),
                    MAX_TOKEN_TICKER_SIZE,
                    "token_inputs.create_input.token_ticker",
                )?));
            }
        }

        leaves.push(leaf_hash(&create_input.decimals.to_be_bytes()));
        leaves.push(leaf_hash(codec::exact_length(
            &create_input.max_supply,
            MAX_SUPPLY_SIZE,
            "token_inputs.create_input.max_supply",
        )?));
        leaves.push(leaf_hash(&codec::bool_byte(create_input.is_freezable)));

        // A final hash commits to the creation entity key; partial hashes
        // and absent keys commit to the hash of empty input.
        let mut hash_engine = Sha256Hash::engine();
        if !is_partial_hash {
            if let Some(key) = create_input.creation_entity_public_key.as_deref() {
                hash_engine.input(key);
            }
        }
        leaves.push(Sha256Hash::from_engine(hash_engine));

        Ok(())
    }

    /// Mint and transfer transactions must have at least one output; create
    /// transactions define metadata only and are allowed to have none.
    fn check_outputs_not_empty(token_tx: &TokenTransaction) -> Result<(), ValidationError> {
        if token_tx.token_outputs.is_empty()
            && !matches!(token_tx.token_inputs, TokenTransactionInput::Create(..))
        {
            return Err(ValidationError::EmptyField {
                field: "token_outputs".to_owned(),
            });
        }
        Ok(())
    }

    /// Sorts operator keys ascending by unsigned byte-wise lexicographic
    /// order with length as the tiebreak, so the digest does not depend on
    /// the caller's enumeration order. Keys are validated in sorted order.
    fn sorted_operator_keys(keys: &[Vec<u8>]) -> Result<Vec<&[u8]>, ValidationError> {
        let mut sorted: Vec<&[u8]> = keys.iter().map(Vec::as_slice).collect();
        sorted.sort();

        for (index, key) in sorted.iter().enumerate() {
            codec::non_empty(key, &format!("spark_operator_identity_public_keys[{index}]"))?;
        }

        Ok(sorted)
    }
}

impl TryFrom<&TokenTransaction> for SparkHash {
    type Error = ValidationError;

    fn try_from(token_tx: &TokenTransaction) -> Result<Self, Self::Error> {
        Self::hash_token_transaction(token_tx, false)
    }
}

#[cfg(test)]
mod test {
    use bitcoin::hashes::{Hash, sha256::Hash as Sha256Hash};
    use once_cell::sync::Lazy;
    use token_hasher::ValidationError;

    use super::SparkHash;
    use crate::{
        token_output::{TokenOutput, TokenOutputToSpend},
        token_transaction::{
            Network, TokenCreateInput, TokenMintInput, TokenTransaction, TokenTransactionInput, TokenTransactionType,
            TokenTransactionVersion, TokenTransferInput,
        },
    };

    static ISSUER_PUBKEY: Lazy<Vec<u8>> = Lazy::new(|| {
        let mut key = vec![0x02];
        key.extend_from_slice(&[0x11; 32]);
        key
    });

    static OWNER_PUBKEY: Lazy<Vec<u8>> = Lazy::new(|| {
        let mut key = vec![0x03];
        key.extend_from_slice(&[0x22; 32]);
        key
    });

    static REVOCATION_COMMITMENT: Lazy<Vec<u8>> = Lazy::new(|| {
        let mut key = vec![0x02];
        key.extend_from_slice(&[0x33; 32]);
        key
    });

    static SO_PUBKEY_A: Lazy<Vec<u8>> = Lazy::new(|| {
        let mut key = vec![0x02];
        key.extend_from_slice(&[0x44; 32]);
        key
    });

    static SO_PUBKEY_B: Lazy<Vec<u8>> = Lazy::new(|| {
        let mut key = vec![0x03];
        key.extend_from_slice(&[0x55; 32]);
        key
    });

    fn test_output() -> TokenOutput {
        TokenOutput {
            id: Some("db1a4e48-0fc5-4f6c-8a80-d9d6c561a436".into()),
            owner_public_key: OWNER_PUBKEY.clone(),
            revocation_commitment: Some(REVOCATION_COMMITMENT.clone()),
            withdraw_bond_sats: 10000,
            withdraw_relative_block_locktime: 100,
            token_public_key: None,
            token_identifier: Some([0x07; 32]),
            token_amount: vec![0x03, 0xe8],
        }
    }

    fn mint_transaction(version: TokenTransactionVersion) -> TokenTransaction {
        TokenTransaction {
            version,
            token_inputs: TokenTransactionInput::Mint(TokenMintInput {
                issuer_public_key: ISSUER_PUBKEY.clone(),
                issuer_provided_timestamp: None,
                token_identifier: Some([0x07; 32]),
            }),
            token_outputs: vec![test_output()],
            spark_operator_identity_public_keys: vec![SO_PUBKEY_B.clone(), SO_PUBKEY_A.clone()],
            network: Network::Regtest,
            client_created_timestamp: Some(100),
            expiry_time: None,
        }
    }

    /// Reduces explicitly built leaves the way the wire format defines the
    /// final digest, independently of `LeafHasher`'s streaming path.
    fn combine(leaves: &[Sha256Hash]) -> Sha256Hash {
        let mut concatenated = Vec::with_capacity(leaves.len() * 32);
        for leaf in leaves {
            concatenated.extend_from_slice(leaf.as_byte_array());
        }
        Sha256Hash::hash(&concatenated)
    }

    #[test]
    fn test_mint_token_tx_hash_v1_leaf_layout() -> Result<(), Box<dyn std::error::Error>> {
        let token_tx = mint_transaction(TokenTransactionVersion::V1);
        let final_hash = SparkHash::hash_token_transaction(&token_tx, false)?;

        let output = test_output();
        let mut output_bytes = Vec::new();
        output_bytes.extend_from_slice(output.id.as_ref().unwrap().as_bytes());
        output_bytes.extend_from_slice(&output.owner_public_key);
        output_bytes.extend_from_slice(output.revocation_commitment.as_ref().unwrap());
        output_bytes.extend_from_slice(&10000u64.to_be_bytes());
        output_bytes.extend_from_slice(&100u64.to_be_bytes());
        output_bytes.extend_from_slice(&[0u8; 33]);
        output_bytes.extend_from_slice(&[0x07; 32]);
        output_bytes.extend_from_slice(&output.token_amount);

        let expected = combine(&[
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&TokenTransactionType::Mint.as_u32().to_be_bytes()),
            Sha256Hash::hash(&ISSUER_PUBKEY),
            Sha256Hash::hash(&[0x07; 32]),
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&output_bytes),
            Sha256Hash::hash(&2u32.to_be_bytes()),
            Sha256Hash::hash(&SO_PUBKEY_A),
            Sha256Hash::hash(&SO_PUBKEY_B),
            Sha256Hash::hash(&Network::Regtest.as_u32().to_be_bytes()),
            Sha256Hash::hash(&100u64.to_be_bytes()),
            Sha256Hash::hash(&0u64.to_be_bytes()),
        ]);

        assert_eq!(final_hash.0, expected);

        Ok(())
    }

    #[test]
    fn test_mint_token_tx_hash_v0_leaf_layout() -> Result<(), Box<dyn std::error::Error>> {
        let mut token_tx = mint_transaction(TokenTransactionVersion::V0);
        if let TokenTransactionInput::Mint(mint_input) = &mut token_tx.token_inputs {
            mint_input.issuer_provided_timestamp = Some(1_700_000_000_123);
            mint_input.token_identifier = None;
        }
        let final_hash = SparkHash::hash_token_transaction(&token_tx, false)?;

        let mut mint_bytes = ISSUER_PUBKEY.clone();
        mint_bytes.extend_from_slice(&1_700_000_000_123u64.to_le_bytes());

        let output = test_output();
        let mut output_bytes = Vec::new();
        output_bytes.extend_from_slice(output.id.as_ref().unwrap().as_bytes());
        output_bytes.extend_from_slice(&output.owner_public_key);
        output_bytes.extend_from_slice(output.revocation_commitment.as_ref().unwrap());
        output_bytes.extend_from_slice(&10000u64.to_be_bytes());
        output_bytes.extend_from_slice(&100u64.to_be_bytes());
        // No token public key and no token identifier in a V0 output leaf.
        output_bytes.extend_from_slice(&output.token_amount);

        let expected = combine(&[
            Sha256Hash::hash(&mint_bytes),
            Sha256Hash::hash(&output_bytes),
            Sha256Hash::hash(&SO_PUBKEY_A),
            Sha256Hash::hash(&SO_PUBKEY_B),
            Sha256Hash::hash(&Network::Regtest.as_u32().to_be_bytes()),
        ]);

        assert_eq!(final_hash.0, expected);

        Ok(())
    }

    #[test]
    fn test_v0_mint_zero_timestamp_is_omitted() -> Result<(), Box<dyn std::error::Error>> {
        let mut token_tx = mint_transaction(TokenTransactionVersion::V0);
        token_tx.client_created_timestamp = None;
        if let TokenTransactionInput::Mint(mint_input) = &mut token_tx.token_inputs {
            mint_input.issuer_provided_timestamp = Some(0);
        }

        let with_zero = SparkHash::hash_token_transaction(&token_tx, false)?;

        if let TokenTransactionInput::Mint(mint_input) = &mut token_tx.token_inputs {
            mint_input.issuer_provided_timestamp = None;
        }
        let without = SparkHash::hash_token_transaction(&token_tx, false)?;

        assert_eq!(with_zero, without);

        Ok(())
    }

    #[test]
    fn test_transfer_token_tx_hash_v1_leaf_layout() -> Result<(), Box<dyn std::error::Error>> {
        let prev_hash = Sha256Hash::hash("previous transaction".as_bytes());

        let token_tx = TokenTransaction {
            version: TokenTransactionVersion::V1,
            token_inputs: TokenTransactionInput::Transfer(TokenTransferInput {
                outputs_to_spend: vec![TokenOutputToSpend {
                    prev_token_transaction_hash: prev_hash.as_byte_array().to_vec(),
                    prev_token_transaction_vout: 4,
                }],
            }),
            token_outputs: vec![test_output()],
            spark_operator_identity_public_keys: vec![SO_PUBKEY_A.clone()],
            network: Network::Regtest,
            client_created_timestamp: Some(100),
            expiry_time: Some(65_999),
        };

        let final_hash = SparkHash::hash_token_transaction(&token_tx, false)?;

        let mut outpoint_bytes = prev_hash.as_byte_array().to_vec();
        outpoint_bytes.extend_from_slice(&4u32.to_be_bytes());

        let output = test_output();
        let mut output_bytes = Vec::new();
        output_bytes.extend_from_slice(output.id.as_ref().unwrap().as_bytes());
        output_bytes.extend_from_slice(&output.owner_public_key);
        output_bytes.extend_from_slice(output.revocation_commitment.as_ref().unwrap());
        output_bytes.extend_from_slice(&10000u64.to_be_bytes());
        output_bytes.extend_from_slice(&100u64.to_be_bytes());
        output_bytes.extend_from_slice(&[0u8; 33]);
        output_bytes.extend_from_slice(&[0x07; 32]);
        output_bytes.extend_from_slice(&output.token_amount);

        let expected = combine(&[
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&TokenTransactionType::Transfer.as_u32().to_be_bytes()),
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&outpoint_bytes),
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&output_bytes),
            Sha256Hash::hash(&1u32.to_be_bytes()),
            Sha256Hash::hash(&SO_PUBKEY_A),
            Sha256Hash::hash(&Network::Regtest.as_u32().to_be_bytes()),
            Sha256Hash::hash(&100u64.to_be_bytes()),
            // 65_999 ms truncate to 65 whole seconds.
            Sha256Hash::hash(&65u64.to_be_bytes()),
        ]);

        assert_eq!(final_hash.0, expected);

        Ok(())
    }

    #[test]
    fn test_create_token_tx_hash_v0_leaf_layout() -> Result<(), Box<dyn std::error::Error>> {
        let token_tx = TokenTransaction {
            version: TokenTransactionVersion::V0,
            token_inputs: TokenTransactionInput::Create(TokenCreateInput {
                issuer_public_key: ISSUER_PUBKEY.clone(),
                token_name: "RaccoonCoin".into(),
                token_ticker: "RCC".into(),
                decimals: 10,
                max_supply: vec![0x9c; 16],
                is_freezable: false,
                creation_entity_public_key: Some(OWNER_PUBKEY.clone()),
            }),
            token_outputs: vec![],
            spark_operator_identity_public_keys: vec![SO_PUBKEY_A.clone()],
            network: Network::Mainnet,
            client_created_timestamp: None,
            expiry_time: None,
        };

        let final_hash = SparkHash::hash_token_transaction(&token_tx, false)?;
        let partial_hash = SparkHash::hash_token_transaction(&token_tx, true)?;

        let mut name_bytes = [0u8; 20];
        name_bytes[.."RaccoonCoin".len()].copy_from_slice(b"RaccoonCoin");
        let mut ticker_bytes = [0u8; 6];
        ticker_bytes[..3].copy_from_slice(b"RCC");

        let common_leaves = [
            Sha256Hash::hash(&ISSUER_PUBKEY),
            Sha256Hash::hash(&name_bytes),
            Sha256Hash::hash(&ticker_bytes),
            Sha256Hash::hash(&10u32.to_be_bytes()),
            Sha256Hash::hash(&[0x9c; 16]),
            Sha256Hash::hash(&[0u8]),
        ];

        let mut final_leaves = common_leaves.to_vec();
        final_leaves.push(Sha256Hash::hash(&OWNER_PUBKEY));
        final_leaves.push(Sha256Hash::hash(&SO_PUBKEY_A));
        final_leaves.push(Sha256Hash::hash(&Network::Mainnet.as_u32().to_be_bytes()));

        let mut partial_leaves = common_leaves.to_vec();
        partial_leaves.push(Sha256Hash::hash(&[]));
        partial_leaves.push(Sha256Hash::hash(&SO_PUBKEY_A));
        partial_leaves.push(Sha256Hash::hash(&Network::Mainnet.as_u32().to_be_bytes()));

        assert_eq!(final_hash.0, combine(&final_leaves));
        assert_eq!(partial_hash.0, combine(&partial_leaves));
        assert_ne!(final_hash, partial_hash);

        Ok(())
    }

    #[test]
    fn test_operator_key_order_does_not_matter() -> Result<(), Box<dyn std::error::Error>> {
        let mut token_tx = mint_transaction(TokenTransactionVersion::V1);
        let forward = SparkHash::hash_token_transaction(&token_tx, false)?;

        token_tx.spark_operator_identity_public_keys.reverse();
        let reversed = SparkHash::hash_token_transaction(&token_tx, false)?;

        assert_eq!(forward, reversed);

        Ok(())
    }

    #[test]
    fn test_empty_operator_key_is_rejected() {
        let mut token_tx = mint_transaction(TokenTransactionVersion::V1);
        token_tx.spark_operator_identity_public_keys.push(vec![]);

        let err = SparkHash::hash_token_transaction(&token_tx, false).unwrap_err();
        // The empty key sorts first.
        assert_eq!(err, ValidationError::EmptyField {
            field: "spark_operator_identity_public_keys[0]".to_owned(),
        });
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let err = TokenTransactionVersion::try_from(7).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedVersion { version: 7 });
    }
}
