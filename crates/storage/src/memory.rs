use crate::{
    AcceptanceDataStore, BlockHeaderStore, BlockStore, ConsensusStorage, DaaBlocksStore,
    GhostdagDataStore, StagingArea, StoreError, StoreResult, ACCEPTANCE_DATA_STORE,
    BLOCK_HEADER_STORE, BLOCK_STORE, DAA_ADDED_BLOCKS_STORE, DAA_SCORE_STORE, GHOSTDAG_DATA_STORE,
};
use kdag_types::{AcceptanceData, Block, BlockHash, BlockHeader, GhostdagData};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

type Table<T> = Arc<RwLock<HashMap<String, T>>>;

/// In-memory backend, keyed by hex-encoded block hash.
#[derive(Default, Clone)]
pub struct MemoryStorage {
    headers: Table<BlockHeader>,
    blocks: Table<Block>,
    ghostdag_trusted: Table<GhostdagData>,
    ghostdag_untrusted: Table<GhostdagData>,
    acceptance_data: Table<AcceptanceData>,
    daa_scores: Table<u64>,
    daa_added_blocks: Table<Vec<BlockHash>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn ghostdag_table(&self, is_trusted: bool) -> &Table<GhostdagData> {
        if is_trusted {
            &self.ghostdag_trusted
        } else {
            &self.ghostdag_untrusted
        }
    }
}

fn lookup<T: Clone>(
    staged: Option<&T>,
    table: &Table<T>,
    store: &'static str,
    hash: &BlockHash,
) -> StoreResult<T> {
    if let Some(value) = staged {
        return Ok(value.clone());
    }
    table
        .read()
        .get(&hex::encode(hash))
        .cloned()
        .ok_or_else(|| StoreError::not_found(store, hash))
}

fn apply<T>(guard: &mut HashMap<String, T>, staged: impl IntoIterator<Item = (BlockHash, T)>) {
    for (hash, value) in staged {
        guard.insert(hex::encode(hash), value);
    }
}

impl BlockHeaderStore for MemoryStorage {
    fn block_header(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<BlockHeader> {
        lookup(staging.headers.get(hash), &self.headers, BLOCK_HEADER_STORE, hash)
    }
}

impl BlockStore for MemoryStorage {
    fn block(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<Block> {
        lookup(staging.blocks.get(hash), &self.blocks, BLOCK_STORE, hash)
    }
}

impl GhostdagDataStore for MemoryStorage {
    fn ghostdag_data(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
        is_trusted: bool,
    ) -> StoreResult<GhostdagData> {
        lookup(
            staging.ghostdag.get(&(*hash, is_trusted)),
            self.ghostdag_table(is_trusted),
            GHOSTDAG_DATA_STORE,
            hash,
        )
    }
}

impl AcceptanceDataStore for MemoryStorage {
    fn acceptance_data(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
    ) -> StoreResult<AcceptanceData> {
        lookup(
            staging.acceptance_data.get(hash),
            &self.acceptance_data,
            ACCEPTANCE_DATA_STORE,
            hash,
        )
    }
}

impl DaaBlocksStore for MemoryStorage {
    fn daa_score(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<u64> {
        lookup(staging.daa_scores.get(hash), &self.daa_scores, DAA_SCORE_STORE, hash)
    }

    fn daa_added_blocks(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
    ) -> StoreResult<Vec<BlockHash>> {
        lookup(
            staging.daa_added_blocks.get(hash),
            &self.daa_added_blocks,
            DAA_ADDED_BLOCKS_STORE,
            hash,
        )
    }
}

impl ConsensusStorage for MemoryStorage {
    fn commit(&self, staging: StagingArea) -> StoreResult<()> {
        let staged = staging.len();
        let StagingArea {
            headers,
            blocks,
            ghostdag,
            acceptance_data,
            daa_scores,
            daa_added_blocks,
        } = staging;

        let (trusted, untrusted): (HashMap<_, _>, HashMap<_, _>) =
            ghostdag.into_iter().partition(|((_, is_trusted), _)| *is_trusted);

        // All guards are held before the first insert, always in this order.
        let mut headers_table = self.headers.write();
        let mut blocks_table = self.blocks.write();
        let mut trusted_table = self.ghostdag_trusted.write();
        let mut untrusted_table = self.ghostdag_untrusted.write();
        let mut acceptance_table = self.acceptance_data.write();
        let mut daa_scores_table = self.daa_scores.write();
        let mut daa_added_table = self.daa_added_blocks.write();

        apply(&mut headers_table, headers);
        apply(&mut blocks_table, blocks);
        apply(&mut trusted_table, trusted.into_iter().map(|((hash, _), data)| (hash, data)));
        apply(&mut untrusted_table, untrusted.into_iter().map(|((hash, _), data)| (hash, data)));
        apply(&mut acceptance_table, acceptance_data);
        apply(&mut daa_scores_table, daa_scores);
        apply(&mut daa_added_table, daa_added_blocks);

        tracing::debug!(entries = staged, "committed staging area to memory storage");
        Ok(())
    }
}
