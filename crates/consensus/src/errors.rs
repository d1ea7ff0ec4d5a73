use kdag_storage::StoreError;
use kdag_types::BlockHash;

/// Consensus rule violations. A block failing one of these is invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("wrong block version: expected {expected}, got {actual}")]
    WrongBlockVersion { expected: u16, actual: u16 },
    #[error("block timestamp {timestamp} is in the future (max allowed {max_allowed})")]
    TimeTooMuchInTheFuture { timestamp: i64, max_allowed: i64 },
    #[error("block has no parents")]
    NoParents,
    #[error("block header has {count} parents, but the maximum allowed amount is {max}")]
    TooManyParents { count: usize, max: usize },
    #[error("bad coinbase payload: {0}")]
    BadCoinbasePayloadLen(String),
    #[error("coinbase transaction of block {} is not the expected one", hex::encode(.0))]
    BadCoinbaseTransaction(BlockHash),
}

/// Consensus errors
#[derive(thiserror::Error, Debug)]
pub enum ConsensusError {
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error(
        "acceptance data is expected to belong to {} but belongs to {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    AcceptanceDataMismatch {
        expected: BlockHash,
        actual: BlockHash,
    },
    #[error("no acceptance data for merged block {}", hex::encode(.0))]
    MissingAcceptanceData(BlockHash),
    #[error("block {} has no coinbase transaction", hex::encode(.0))]
    MissingCoinbaseTransaction(BlockHash),
    #[error("reward overflow while merging block {}", hex::encode(.0))]
    RewardOverflow(BlockHash),
    #[error("selected parent chain is broken at block {}", hex::encode(.0))]
    BrokenSelectedParentChain(BlockHash),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ConsensusError {
    /// The block broke a consensus rule.
    pub fn is_rule_error(&self) -> bool {
        matches!(self, ConsensusError::Rule(_))
    }

    /// Caller misuse or corrupted staged data rather than a bad block.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ConsensusError::AcceptanceDataMismatch { .. }
                | ConsensusError::MissingAcceptanceData(_)
                | ConsensusError::MissingCoinbaseTransaction(_)
                | ConsensusError::RewardOverflow(_)
                | ConsensusError::BrokenSelectedParentChain(_)
        )
    }

    pub fn as_rule_error(&self) -> Option<&RuleError> {
        match self {
            ConsensusError::Rule(err) => Some(err),
            _ => None,
        }
    }
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;
