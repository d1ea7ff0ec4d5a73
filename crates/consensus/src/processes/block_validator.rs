use crate::errors::{ConsensusResult, RuleError};
use crate::logger::ExecutionTimer;
use crate::model::BlockHeaderStoreRef;
use crate::params::ConsensusParams;
use crate::time::TimeSource;
use kdag_storage::StagingArea;
use kdag_types::constants::{BLOCK_VERSION_KHASH_V1, BLOCK_VERSION_KHASH_V2};
use kdag_types::{BlockHash, BlockHeader};
use std::sync::Arc;
use tracing::Span;

/// Context-free header checks run before a block enters the DAG.
pub struct BlockValidator {
    genesis_hash: BlockHash,
    max_block_parents: usize,
    max_future_drift_ms: i64,
    hf_daa_score: u64,

    block_header_store: BlockHeaderStoreRef,
    time_source: Arc<dyn TimeSource>,
    span: Span,
}

impl BlockValidator {
    pub fn new(
        params: &ConsensusParams,
        block_header_store: BlockHeaderStoreRef,
        time_source: Arc<dyn TimeSource>,
        span: Span,
    ) -> Self {
        Self {
            genesis_hash: params.genesis_hash,
            max_block_parents: params.max_block_parents,
            max_future_drift_ms: params.max_future_timestamp_drift_ms(),
            hf_daa_score: params.hf_daa_score,
            block_header_store,
            time_source,
            span,
        }
    }

    /// Validate the staged or stored header of `block_hash` without looking at any other block.
    pub fn validate_header_in_isolation(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
    ) -> ConsensusResult<()> {
        let _timer = ExecutionTimer::start(&self.span, "validate_header_in_isolation");

        let header = self.block_header_store.block_header(staging, block_hash)?;

        if *block_hash != self.genesis_hash {
            self.check_block_version(&header)?;
        }
        self.check_block_timestamp_in_isolation(&header)?;
        self.check_parents_limit(&header)?;
        Ok(())
    }

    fn check_block_version(&self, header: &BlockHeader) -> Result<(), RuleError> {
        let (expected, phase) = if header.daa_score >= self.hf_daa_score {
            (BLOCK_VERSION_KHASH_V2, "after")
        } else {
            (BLOCK_VERSION_KHASH_V1, "before")
        };
        if header.version != expected {
            self.span.in_scope(|| {
                tracing::warn!(
                    daa_score = header.daa_score,
                    version = header.version,
                    "{phase} HF1 the block version should be {expected}"
                )
            });
            return Err(RuleError::WrongBlockVersion {
                expected,
                actual: header.version,
            });
        }
        Ok(())
    }

    fn check_block_timestamp_in_isolation(&self, header: &BlockHeader) -> Result<(), RuleError> {
        let max_allowed = self
            .time_source
            .now_millis()
            .saturating_add(self.max_future_drift_ms);
        if header.timestamp > max_allowed {
            return Err(RuleError::TimeTooMuchInTheFuture {
                timestamp: header.timestamp,
                max_allowed,
            });
        }
        Ok(())
    }

    fn check_parents_limit(&self, header: &BlockHeader) -> Result<(), RuleError> {
        let count = header.direct_parents().len();
        if count == 0 && header.hash() != self.genesis_hash {
            return Err(RuleError::NoParents);
        }
        if count > self.max_block_parents {
            return Err(RuleError::TooManyParents {
                count,
                max: self.max_block_parents,
            });
        }
        Ok(())
    }
}
