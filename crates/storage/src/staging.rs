use kdag_types::{AcceptanceData, Block, BlockHash, BlockHeader, GhostdagData};
use std::collections::HashMap;

/// Uncommitted writes of a single validation attempt.
///
/// Owned by one caller at a time; dropping it discards the attempt.
#[derive(Debug, Default, Clone)]
pub struct StagingArea {
    pub(crate) headers: HashMap<BlockHash, BlockHeader>,
    pub(crate) blocks: HashMap<BlockHash, Block>,
    pub(crate) ghostdag: HashMap<(BlockHash, bool), GhostdagData>,
    pub(crate) acceptance_data: HashMap<BlockHash, AcceptanceData>,
    pub(crate) daa_scores: HashMap<BlockHash, u64>,
    pub(crate) daa_added_blocks: HashMap<BlockHash, Vec<BlockHash>>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of staged entries across all stores.
    pub fn len(&self) -> usize {
        self.headers.len()
            + self.blocks.len()
            + self.ghostdag.len()
            + self.acceptance_data.len()
            + self.daa_scores.len()
            + self.daa_added_blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
