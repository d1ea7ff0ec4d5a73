use crate::errors::ConsensusResult;
use crate::logger::{consensus_span, process_span};
use crate::model::{DagTraversalManager, GhostdagDataStoreRef, ParentsManager};
use crate::params::ConsensusParams;
use crate::processes::block_validator::BlockValidator;
use crate::processes::coinbase_manager::CoinbaseManager;
use crate::processes::consensus_state_manager::ConsensusStateManager;
use crate::processes::dag_traversal_manager::SelectedParentChainTraversal;
use crate::processes::parents_manager::GenesisAwareParentsManager;
use crate::time::{SystemTimeSource, TimeSource};
use kdag_storage::{ConsensusStorage, StagingArea};
use kdag_types::{
    BlockHash, BlockHeader, BlockLevelParents, CoinbaseData, DomainTransaction, SelectedChainPath,
};
use std::sync::Arc;

/// Wires every consensus process from one set of params and one storage backend.
pub struct ConsensusFactory {
    time_source: Arc<dyn TimeSource>,
    dag_traversal_manager: Option<Arc<dyn DagTraversalManager>>,
}

impl Default for ConsensusFactory {
    fn default() -> Self {
        Self {
            time_source: Arc::new(SystemTimeSource),
            dag_traversal_manager: None,
        }
    }
}

impl ConsensusFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Replace the default selected-parent walk over stored GHOSTDAG data.
    pub fn with_dag_traversal_manager(mut self, manager: Arc<dyn DagTraversalManager>) -> Self {
        self.dag_traversal_manager = Some(manager);
        self
    }

    pub fn new_consensus<S: ConsensusStorage>(
        &self,
        params: ConsensusParams,
        storage: Arc<S>,
    ) -> ConsensusResult<Consensus> {
        params.validate()?;

        let span = consensus_span();
        let ghostdag_data_store: GhostdagDataStoreRef = storage.clone();

        let block_validator = BlockValidator::new(
            &params,
            storage.clone(),
            self.time_source.clone(),
            process_span(&span, "block_validator"),
        );
        let coinbase_manager = CoinbaseManager::new(
            &params,
            ghostdag_data_store.clone(),
            storage.clone(),
            storage.clone(),
            storage.clone(),
            process_span(&span, "coinbase_manager"),
        );
        let dag_traversal_manager: Arc<dyn DagTraversalManager> = match &self.dag_traversal_manager {
            Some(manager) => manager.clone(),
            None => Arc::new(SelectedParentChainTraversal::new(ghostdag_data_store.clone())),
        };
        let consensus_state_manager = ConsensusStateManager::new(
            ghostdag_data_store,
            dag_traversal_manager,
            process_span(&span, "consensus_state_manager"),
        );
        let parents_manager =
            GenesisAwareParentsManager::new(params.genesis_hash, params.max_block_level);

        span.in_scope(|| {
            tracing::info!(
                network = %params.network_name,
                genesis = %hex::encode(params.genesis_hash),
                "consensus created"
            )
        });

        Ok(Consensus {
            params,
            storage,
            block_validator,
            coinbase_manager,
            consensus_state_manager,
            parents_manager: Arc::new(parents_manager),
        })
    }
}

/// Handle over the wired processes. Callers own their staging areas.
pub struct Consensus {
    params: ConsensusParams,
    storage: Arc<dyn ConsensusStorage>,
    block_validator: BlockValidator,
    coinbase_manager: CoinbaseManager,
    consensus_state_manager: ConsensusStateManager,
    parents_manager: Arc<dyn ParentsManager>,
}

impl Consensus {
    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    pub fn coinbase_manager(&self) -> &CoinbaseManager {
        &self.coinbase_manager
    }

    pub fn parents_manager(&self) -> Arc<dyn ParentsManager> {
        self.parents_manager.clone()
    }

    pub fn validate_header_in_isolation(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
    ) -> ConsensusResult<()> {
        self.block_validator
            .validate_header_in_isolation(staging, block_hash)
    }

    pub fn calc_block_subsidy(&self, staging: &StagingArea, block_hash: &BlockHash) -> ConsensusResult<u64> {
        self.coinbase_manager.calc_block_subsidy(staging, block_hash)
    }

    pub fn expected_coinbase_transaction(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
        coinbase_data: &CoinbaseData,
    ) -> ConsensusResult<(DomainTransaction, bool)> {
        self.coinbase_manager
            .expected_coinbase_transaction(staging, block_hash, coinbase_data)
    }

    pub fn validate_coinbase_transaction(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
        coinbase_tx: &DomainTransaction,
    ) -> ConsensusResult<()> {
        self.coinbase_manager
            .validate_coinbase_transaction(staging, block_hash, coinbase_tx)
    }

    pub fn get_virtual_selected_parent_chain_from_block(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
    ) -> ConsensusResult<SelectedChainPath> {
        self.consensus_state_manager
            .get_virtual_selected_parent_chain_from_block(staging, block_hash)
    }

    pub fn parents(&self, header: &BlockHeader) -> Vec<BlockLevelParents> {
        self.parents_manager.parents(header)
    }

    /// Apply a finished attempt to the backend.
    pub fn commit(&self, staging: StagingArea) -> ConsensusResult<()> {
        self.storage.commit(staging)?;
        Ok(())
    }
}
