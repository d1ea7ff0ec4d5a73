use crate::errors::ConsensusResult;
use crate::model::{DagTraversalManager, GhostdagDataStoreRef};
use kdag_storage::StagingArea;
use kdag_types::{BlockHash, SelectedChainPath, VIRTUAL_BLOCK_HASH};
use std::sync::Arc;
use tracing::Span;

pub struct ConsensusStateManager {
    ghostdag_data_store: GhostdagDataStoreRef,
    dag_traversal_manager: Arc<dyn DagTraversalManager>,
    span: Span,
}

impl ConsensusStateManager {
    pub fn new(
        ghostdag_data_store: GhostdagDataStoreRef,
        dag_traversal_manager: Arc<dyn DagTraversalManager>,
        span: Span,
    ) -> Self {
        Self {
            ghostdag_data_store,
            dag_traversal_manager,
            span,
        }
    }

    /// Chain changes from `block_hash` to the virtual's selected parent.
    ///
    /// Computed against the selected parent rather than the virtual itself so the
    /// virtual never shows up in `added`.
    pub fn get_virtual_selected_parent_chain_from_block(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
    ) -> ConsensusResult<SelectedChainPath> {
        let virtual_ghostdag_data =
            self.ghostdag_data_store
                .ghostdag_data(staging, &VIRTUAL_BLOCK_HASH, false)?;
        let virtual_selected_parent = virtual_ghostdag_data.selected_parent;

        let path = self.dag_traversal_manager.calculate_chain_path(
            staging,
            block_hash,
            &virtual_selected_parent,
        )?;
        self.span.in_scope(|| {
            tracing::trace!(
                removed = path.removed.len(),
                added = path.added.len(),
                "resolved virtual selected parent chain"
            )
        });
        Ok(path)
    }
}
