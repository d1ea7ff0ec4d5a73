use crate::transaction::DomainTransaction;
use blake3::Hasher as Blake3;
use serde::{Deserialize, Serialize};

/// Canonical identifier for a block header (32-byte digest).
pub type BlockHash = [u8; 32];

/// Parents of a block at a single level of the multi-level parent structure.
pub type BlockLevelParents = Vec<BlockHash>;

/// Index of the coinbase transaction inside a block body.
pub const COINBASE_TRANSACTION_INDEX: usize = 0;

/// Special hash identifying the virtual block (the DAG tip aggregate).
pub const VIRTUAL_BLOCK_HASH: BlockHash = [0xff; 32];

/// Special hash identifying the virtual genesis block used below the pruning point.
pub const VIRTUAL_GENESIS_BLOCK_HASH: BlockHash = {
    let mut hash = [0xff; 32];
    hash[31] = 0xfe;
    hash
};

const HASH_CONTEXT: &str = "kdag block header v1";

/// Block header as stored by the header store. Immutable once persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u16,
    /// Parents per level; level 0 holds the direct parents.
    pub parents: Vec<BlockLevelParents>,
    pub hash_merkle_root: [u8; 32],
    pub accepted_id_merkle_root: [u8; 32],
    pub utxo_commitment: [u8; 32],
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    pub bits: u32,
    pub nonce: u64,
    pub daa_score: u64,
    pub blue_work: u128,
    pub blue_score: u64,
    pub pruning_point: BlockHash,
}

impl BlockHeader {
    /// Direct parents of the block (level 0). Empty for genesis.
    pub fn direct_parents(&self) -> &[BlockHash] {
        self.parents_at_level(0)
    }

    /// Parents at `level`, or an empty slice if the header does not reach that level.
    pub fn parents_at_level(&self, level: usize) -> &[BlockHash] {
        self.parents.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Compute the canonical hash of the header fields.
    pub fn hash(&self) -> BlockHash {
        let mut hasher = Blake3::new_derive_key(HASH_CONTEXT);
        hasher.update(&self.version.to_le_bytes());
        hasher.update(&(self.parents.len() as u64).to_le_bytes());
        for level in &self.parents {
            hasher.update(&(level.len() as u64).to_le_bytes());
            for parent in level {
                hasher.update(parent);
            }
        }
        hasher.update(&self.hash_merkle_root);
        hasher.update(&self.accepted_id_merkle_root);
        hasher.update(&self.utxo_commitment);
        hasher.update(&self.timestamp.to_le_bytes());
        hasher.update(&self.bits.to_le_bytes());
        hasher.update(&self.nonce.to_le_bytes());
        hasher.update(&self.daa_score.to_le_bytes());
        hasher.update(&self.blue_work.to_le_bytes());
        hasher.update(&self.blue_score.to_le_bytes());
        hasher.update(&self.pruning_point);

        *hasher.finalize().as_bytes()
    }
}

/// A full block: header plus transactions, coinbase first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub header: BlockHeader,
    #[serde(default)]
    pub transactions: Vec<DomainTransaction>,
}

impl Block {
    pub fn new(header: BlockHeader, transactions: Vec<DomainTransaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Return the canonical identifier for this block.
    pub fn hash(&self) -> BlockHash {
        self.header.hash()
    }

    /// The block's own coinbase transaction, if the body has one.
    pub fn coinbase_transaction(&self) -> Option<&DomainTransaction> {
        self.transactions.get(COINBASE_TRANSACTION_INDEX)
    }
}

/// Serde adapter encoding a [`BlockHash`] as a hex string.
///
/// Used by configuration files where a JSON-style byte array would be unreadable.
pub mod hash_hex {
    use super::BlockHash;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(hash: &BlockHash, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BlockHash, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.strip_prefix("0x").unwrap_or(&raw);
        let bytes = hex::decode(trimmed).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|b: Vec<u8>| D::Error::custom(format!("expected 32 bytes, got {}", b.len())))
    }
}
