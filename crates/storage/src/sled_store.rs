use crate::{
    AcceptanceDataStore, BlockHeaderStore, BlockStore, ConsensusStorage, DaaBlocksStore,
    GhostdagDataStore, StagingArea, StoreError, StoreResult, ACCEPTANCE_DATA_STORE,
    BLOCK_HEADER_STORE, BLOCK_STORE, DAA_ADDED_BLOCKS_STORE, DAA_SCORE_STORE, GHOSTDAG_DATA_STORE,
};
use kdag_types::{AcceptanceData, Block, BlockHash, BlockHeader, GhostdagData};
use serde::{de::DeserializeOwned, Serialize};
use sled::transaction::{ConflictableTransactionResult, TransactionError, TransactionalTree};
use sled::{Db, Transactional, Tree};
use std::collections::HashMap;
use std::path::Path;

/// Sled-backed implementation. Values are JSON, keys are raw block hashes.
pub struct SledStorage {
    db: Db,
    headers: Tree,
    blocks: Tree,
    ghostdag_trusted: Tree,
    ghostdag_untrusted: Tree,
    acceptance_data: Tree,
    daa_scores: Tree,
    daa_added_blocks: Tree,
}

impl SledStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Temporary database removed on drop.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> StoreResult<Self> {
        Ok(Self {
            headers: db.open_tree("block_headers")?,
            blocks: db.open_tree("blocks")?,
            ghostdag_trusted: db.open_tree("ghostdag_trusted")?,
            ghostdag_untrusted: db.open_tree("ghostdag_untrusted")?,
            acceptance_data: db.open_tree("acceptance_data")?,
            daa_scores: db.open_tree("daa_scores")?,
            daa_added_blocks: db.open_tree("daa_added_blocks")?,
            db,
        })
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }

    fn ghostdag_tree(&self, is_trusted: bool) -> &Tree {
        if is_trusted {
            &self.ghostdag_trusted
        } else {
            &self.ghostdag_untrusted
        }
    }
}

fn read<T: Clone + DeserializeOwned>(
    staged: Option<&T>,
    tree: &Tree,
    store: &'static str,
    hash: &BlockHash,
) -> StoreResult<T> {
    if let Some(value) = staged {
        return Ok(value.clone());
    }
    match tree.get(&hash[..])? {
        Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
        None => Err(StoreError::not_found(store, hash)),
    }
}

type Encoded = Vec<(BlockHash, Vec<u8>)>;

fn encode<T: Serialize>(staged: impl IntoIterator<Item = (BlockHash, T)>) -> StoreResult<Encoded> {
    staged
        .into_iter()
        .map(|(hash, value)| Ok((hash, serde_json::to_vec(&value)?)))
        .collect()
}

fn insert_all(
    tree: &TransactionalTree,
    entries: &Encoded,
) -> ConflictableTransactionResult<(), StoreError> {
    for (hash, bytes) in entries {
        tree.insert(&hash[..], bytes.as_slice())?;
    }
    Ok(())
}

impl BlockHeaderStore for SledStorage {
    fn block_header(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<BlockHeader> {
        read(staging.headers.get(hash), &self.headers, BLOCK_HEADER_STORE, hash)
    }
}

impl BlockStore for SledStorage {
    fn block(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<Block> {
        read(staging.blocks.get(hash), &self.blocks, BLOCK_STORE, hash)
    }
}

impl GhostdagDataStore for SledStorage {
    fn ghostdag_data(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
        is_trusted: bool,
    ) -> StoreResult<GhostdagData> {
        read(
            staging.ghostdag.get(&(*hash, is_trusted)),
            self.ghostdag_tree(is_trusted),
            GHOSTDAG_DATA_STORE,
            hash,
        )
    }
}

impl AcceptanceDataStore for SledStorage {
    fn acceptance_data(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
    ) -> StoreResult<AcceptanceData> {
        read(
            staging.acceptance_data.get(hash),
            &self.acceptance_data,
            ACCEPTANCE_DATA_STORE,
            hash,
        )
    }
}

impl DaaBlocksStore for SledStorage {
    fn daa_score(&self, staging: &StagingArea, hash: &BlockHash) -> StoreResult<u64> {
        read(staging.daa_scores.get(hash), &self.daa_scores, DAA_SCORE_STORE, hash)
    }

    fn daa_added_blocks(
        &self,
        staging: &StagingArea,
        hash: &BlockHash,
    ) -> StoreResult<Vec<BlockHash>> {
        read(
            staging.daa_added_blocks.get(hash),
            &self.daa_added_blocks,
            DAA_ADDED_BLOCKS_STORE,
            hash,
        )
    }
}

impl ConsensusStorage for SledStorage {
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

        // Values are encoded before the transaction; its closure may run more than once.
        let headers = encode(headers)?;
        let blocks = encode(blocks)?;
        let trusted = encode(trusted.into_iter().map(|((hash, _), data)| (hash, data)))?;
        let untrusted = encode(untrusted.into_iter().map(|((hash, _), data)| (hash, data)))?;
        let acceptance_data = encode(acceptance_data)?;
        let daa_scores = encode(daa_scores)?;
        let daa_added_blocks = encode(daa_added_blocks)?;

        (
            &self.headers,
            &self.blocks,
            &self.ghostdag_trusted,
            &self.ghostdag_untrusted,
            &self.acceptance_data,
            &self.daa_scores,
            &self.daa_added_blocks,
        )
            .transaction(
                |(
                    headers_tree,
                    blocks_tree,
                    trusted_tree,
                    untrusted_tree,
                    acceptance_tree,
                    daa_scores_tree,
                    daa_added_tree,
                )| {
                    insert_all(headers_tree, &headers)?;
                    insert_all(blocks_tree, &blocks)?;
                    insert_all(trusted_tree, &trusted)?;
                    insert_all(untrusted_tree, &untrusted)?;
                    insert_all(acceptance_tree, &acceptance_data)?;
                    insert_all(daa_scores_tree, &daa_scores)?;
                    insert_all(daa_added_tree, &daa_added_blocks)?;
                    Ok(())
                },
            )
            .map_err(|err| match err {
                TransactionError::Abort(err) => err,
                TransactionError::Storage(err) => StoreError::Database(err),
            })?;
        self.flush()?;

        tracing::debug!(entries = staged, "committed staging area to sled storage");
        Ok(())
    }
}
