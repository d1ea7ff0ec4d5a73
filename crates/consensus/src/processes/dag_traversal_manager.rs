use crate::errors::{ConsensusError, ConsensusResult};
use crate::model::{DagTraversalManager, GhostdagDataStoreRef};
use kdag_storage::StagingArea;
use kdag_types::{BlockHash, GhostdagData, SelectedChainPath, VIRTUAL_GENESIS_BLOCK_HASH};

/// Walks selected-parent links in untrusted GHOSTDAG data.
///
/// Every step must lower the blue score, so stepping down whichever side is
/// higher either meets at the common chain ancestor or hits a root and fails.
pub struct SelectedParentChainTraversal {
    ghostdag_data_store: GhostdagDataStoreRef,
}

impl SelectedParentChainTraversal {
    pub fn new(ghostdag_data_store: GhostdagDataStoreRef) -> Self {
        Self { ghostdag_data_store }
    }

    fn ghostdag_data(&self, staging: &StagingArea, hash: &BlockHash) -> ConsensusResult<GhostdagData> {
        Ok(self.ghostdag_data_store.ghostdag_data(staging, hash, false)?)
    }

    fn selected_parent_of(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
        data: &GhostdagData,
    ) -> ConsensusResult<(BlockHash, GhostdagData)> {
        let parent = data.selected_parent;
        if data.blue_score == 0 || parent == VIRTUAL_GENESIS_BLOCK_HASH {
            return Err(ConsensusError::BrokenSelectedParentChain(*hash));
        }
        let parent_data = self.ghostdag_data(staging, &parent)?;
        if parent_data.blue_score >= data.blue_score {
            return Err(ConsensusError::BrokenSelectedParentChain(*hash));
        }
        Ok((parent, parent_data))
    }
}

impl DagTraversalManager for SelectedParentChainTraversal {
    fn calculate_chain_path(
        &self,
        staging: &StagingArea,
        from: &BlockHash,
        to: &BlockHash,
    ) -> ConsensusResult<SelectedChainPath> {
        let mut removed = Vec::new();
        let mut added = Vec::new();

        let (mut current_from, mut from_data) = (*from, self.ghostdag_data(staging, from)?);
        let (mut current_to, mut to_data) = (*to, self.ghostdag_data(staging, to)?);
        while current_from != current_to {
            if from_data.blue_score >= to_data.blue_score {
                removed.push(current_from);
                (current_from, from_data) = self.selected_parent_of(staging, &current_from, &from_data)?;
            } else {
                added.push(current_to);
                (current_to, to_data) = self.selected_parent_of(staging, &current_to, &to_data)?;
            }
        }

        added.reverse();
        Ok(SelectedChainPath { removed, added })
    }
}
