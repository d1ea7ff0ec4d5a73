//! Interfaces between consensus processes.

use crate::errors::ConsensusResult;
use kdag_storage::{
    AcceptanceDataStore, BlockHeaderStore, BlockStore, DaaBlocksStore, GhostdagDataStore,
    StagingArea,
};
use kdag_types::{BlockHash, BlockHeader, BlockLevelParents, SelectedChainPath};
use std::sync::Arc;

pub type BlockHeaderStoreRef = Arc<dyn BlockHeaderStore + Send + Sync>;
pub type BlockStoreRef = Arc<dyn BlockStore + Send + Sync>;
pub type GhostdagDataStoreRef = Arc<dyn GhostdagDataStore + Send + Sync>;
pub type AcceptanceDataStoreRef = Arc<dyn AcceptanceDataStore + Send + Sync>;
pub type DaaBlocksStoreRef = Arc<dyn DaaBlocksStore + Send + Sync>;

pub trait DagTraversalManager: Send + Sync {
    /// Chain blocks to remove and add when moving the selected tip from `from` to `to`.
    fn calculate_chain_path(
        &self,
        staging: &StagingArea,
        from: &BlockHash,
        to: &BlockHash,
    ) -> ConsensusResult<SelectedChainPath>;
}

/// Header parents with empty levels replaced by genesis where needed.
pub trait ParentsManager: Send + Sync {
    fn parents_at_level(&self, header: &BlockHeader, level: usize) -> BlockLevelParents;
    fn parents(&self, header: &BlockHeader) -> Vec<BlockLevelParents>;
}
