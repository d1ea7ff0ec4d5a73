mod payload;
mod subsidy_schedule;
pub mod subsidy_table;

pub use payload::{
    extract_coinbase_data_blue_score_and_subsidy, serialize_coinbase_payload,
    COINBASE_PAYLOAD_FIXED_LEN,
};
pub use subsidy_schedule::{SUBSIDY_BY_DEFLATIONARY_MONTH, SUBSIDY_TABLE_LEN};

use crate::errors::{ConsensusError, ConsensusResult, RuleError};
use crate::logger::ExecutionTimer;
use crate::model::{AcceptanceDataStoreRef, BlockStoreRef, DaaBlocksStoreRef, GhostdagDataStoreRef};
use crate::params::ConsensusParams;
use kdag_storage::StagingArea;
use kdag_types::constants::MAX_TRANSACTION_VERSION;
use kdag_types::{
    BlockAcceptanceData, BlockHash, CoinbaseData, DomainTransaction, GhostdagData,
    TransactionOutput, SUBNETWORK_ID_COINBASE,
};
use std::collections::{HashMap, HashSet};
use tracing::Span;

/// A year is 365.25 days, a month a twelfth of it. One DAA score unit per second.
pub const SECONDS_PER_MONTH: u64 = 2_629_800;

/// Builds the coinbase transaction a block must carry and the subsidy it may mint.
pub struct CoinbaseManager {
    genesis_hash: BlockHash,
    subsidy_genesis_reward: u64,
    pre_deflationary_phase_base_subsidy: u64,
    deflationary_phase_daa_score: u64,
    coinbase_payload_script_public_key_max_length: u8,

    ghostdag_data_store: GhostdagDataStoreRef,
    acceptance_data_store: AcceptanceDataStoreRef,
    daa_blocks_store: DaaBlocksStoreRef,
    block_store: BlockStoreRef,
    span: Span,
}

impl CoinbaseManager {
    pub fn new(
        params: &ConsensusParams,
        ghostdag_data_store: GhostdagDataStoreRef,
        acceptance_data_store: AcceptanceDataStoreRef,
        daa_blocks_store: DaaBlocksStoreRef,
        block_store: BlockStoreRef,
        span: Span,
    ) -> Self {
        Self {
            genesis_hash: params.genesis_hash,
            subsidy_genesis_reward: params.subsidy_genesis_reward,
            pre_deflationary_phase_base_subsidy: params.pre_deflationary_phase_base_subsidy,
            deflationary_phase_daa_score: params.deflationary_phase_daa_score,
            coinbase_payload_script_public_key_max_length: params
                .coinbase_payload_script_public_key_max_length,
            ghostdag_data_store,
            acceptance_data_store,
            daa_blocks_store,
            block_store,
            span,
        }
    }

    /// The coinbase `block_hash` must carry, and whether it pays any red block reward.
    ///
    /// Each rewarded blue gets its own output, paid to the script in that block's own
    /// coinbase. All red rewards are combined into one output to `coinbase_data`'s script.
    pub fn expected_coinbase_transaction(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
        coinbase_data: &CoinbaseData,
    ) -> ConsensusResult<(DomainTransaction, bool)> {
        let _timer = ExecutionTimer::start(&self.span, "expected_coinbase_transaction");

        let ghostdag_data = self.ghostdag_data_prefer_trusted(staging, block_hash)?;
        let acceptance_data = self.acceptance_data_store.acceptance_data(staging, block_hash)?;
        let daa_added_blocks: HashSet<BlockHash> = self
            .daa_blocks_store
            .daa_added_blocks(staging, block_hash)?
            .into_iter()
            .collect();

        let acceptance_by_hash: HashMap<BlockHash, &BlockAcceptanceData> = acceptance_data
            .iter()
            .map(|data| (data.block_hash, data))
            .collect();
        let acceptance_for = |hash: &BlockHash| {
            acceptance_by_hash
                .get(hash)
                .copied()
                .ok_or(ConsensusError::MissingAcceptanceData(*hash))
        };

        let mut outputs = Vec::with_capacity(ghostdag_data.merge_set_blues.len() + 1);
        for blue in &ghostdag_data.merge_set_blues {
            if let Some(output) =
                self.coinbase_output_for_blue_block(staging, blue, acceptance_for(blue)?, &daa_added_blocks)?
            {
                outputs.push(output);
            }
        }

        let mut red_reward = 0u64;
        for red in &ghostdag_data.merge_set_reds {
            let reward =
                self.calc_merged_block_reward(staging, red, acceptance_for(red)?, &daa_added_blocks)?;
            red_reward = red_reward
                .checked_add(reward)
                .ok_or(ConsensusError::RewardOverflow(*red))?;
        }
        let has_red_reward = red_reward > 0;
        if has_red_reward {
            outputs.push(TransactionOutput {
                value: red_reward,
                script_public_key: coinbase_data.script_public_key.clone(),
            });
        }

        let subsidy = self.calc_block_subsidy(staging, block_hash)?;
        let payload = self.serialize_coinbase_payload(ghostdag_data.blue_score, coinbase_data, subsidy)?;

        self.span.in_scope(|| {
            tracing::debug!(
                block = %hex::encode(block_hash),
                outputs = outputs.len(),
                subsidy,
                has_red_reward,
                "built expected coinbase"
            )
        });

        Ok((
            DomainTransaction {
                version: MAX_TRANSACTION_VERSION,
                inputs: vec![],
                outputs,
                lock_time: 0,
                subnetwork_id: SUBNETWORK_ID_COINBASE,
                gas: 0,
                payload,
            },
            has_red_reward,
        ))
    }

    /// Reject `coinbase_tx` unless it is byte-identical to the expected coinbase of `block_hash`.
    ///
    /// This pins the subsidy embedded in every accepted block to [`Self::calc_block_subsidy`],
    /// which is what lets merging blocks reuse the embedded value later.
    pub fn validate_coinbase_transaction(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
        coinbase_tx: &DomainTransaction,
    ) -> ConsensusResult<()> {
        let (_, coinbase_data, _) = self.extract_coinbase_data_blue_score_and_subsidy(coinbase_tx)?;
        let (expected, _) = self.expected_coinbase_transaction(staging, block_hash, &coinbase_data)?;
        if expected.to_canonical_bytes() != coinbase_tx.to_canonical_bytes() {
            return Err(RuleError::BadCoinbaseTransaction(*block_hash).into());
        }
        Ok(())
    }

    /// Subsidy a block at its DAA score may mint. Integer table lookup only.
    pub fn calc_block_subsidy(&self, staging: &StagingArea, block_hash: &BlockHash) -> ConsensusResult<u64> {
        if *block_hash == self.genesis_hash {
            return Ok(self.subsidy_genesis_reward);
        }
        let daa_score = self.daa_blocks_store.daa_score(staging, block_hash)?;
        Ok(self.subsidy_at_daa_score(daa_score))
    }

    pub fn subsidy_at_daa_score(&self, daa_score: u64) -> u64 {
        if daa_score < self.deflationary_phase_daa_score {
            return self.pre_deflationary_phase_base_subsidy;
        }
        let months = (daa_score - self.deflationary_phase_daa_score) / SECONDS_PER_MONTH;
        deflationary_subsidy_for_month(months)
    }

    pub fn serialize_coinbase_payload(
        &self,
        blue_score: u64,
        coinbase_data: &CoinbaseData,
        subsidy: u64,
    ) -> Result<Vec<u8>, RuleError> {
        serialize_coinbase_payload(
            blue_score,
            coinbase_data,
            subsidy,
            self.coinbase_payload_script_public_key_max_length,
        )
    }

    pub fn extract_coinbase_data_blue_score_and_subsidy(
        &self,
        coinbase_tx: &DomainTransaction,
    ) -> Result<(u64, CoinbaseData, u64), RuleError> {
        extract_coinbase_data_blue_score_and_subsidy(
            coinbase_tx,
            self.coinbase_payload_script_public_key_max_length,
        )
    }

    /// Reward `block_hash` earns in the merging block whose DAA-added set is given.
    ///
    /// Zero unless the block newly enters that DAA window, otherwise its accepted fees
    /// plus the subsidy embedded in its own coinbase.
    pub fn calc_merged_block_reward(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
        block_acceptance_data: &BlockAcceptanceData,
        merging_block_daa_added_blocks: &HashSet<BlockHash>,
    ) -> ConsensusResult<u64> {
        if block_acceptance_data.block_hash != *block_hash {
            return Err(ConsensusError::AcceptanceDataMismatch {
                expected: *block_hash,
                actual: block_acceptance_data.block_hash,
            });
        }
        if !merging_block_daa_added_blocks.contains(block_hash) {
            return Ok(0);
        }

        let total_fees = block_acceptance_data
            .accepted_fees()
            .ok_or(ConsensusError::RewardOverflow(*block_hash))?;

        let block = self.block_store.block(staging, block_hash)?;
        let coinbase = block
            .coinbase_transaction()
            .ok_or(ConsensusError::MissingCoinbaseTransaction(*block_hash))?;
        let (_, _, subsidy) = self.extract_coinbase_data_blue_score_and_subsidy(coinbase)?;

        subsidy
            .checked_add(total_fees)
            .ok_or(ConsensusError::RewardOverflow(*block_hash))
    }

    /// Trusted data keeps the full, non-pruned merge set, so it wins when present.
    fn ghostdag_data_prefer_trusted(
        &self,
        staging: &StagingArea,
        block_hash: &BlockHash,
    ) -> ConsensusResult<GhostdagData> {
        match self.ghostdag_data_store.ghostdag_data(staging, block_hash, true) {
            Ok(data) => Ok(data),
            Err(err) if err.is_not_found() => Ok(self
                .ghostdag_data_store
                .ghostdag_data(staging, block_hash, false)?),
            Err(err) => Err(err.into()),
        }
    }

    fn coinbase_output_for_blue_block(
        &self,
        staging: &StagingArea,
        blue_block: &BlockHash,
        block_acceptance_data: &BlockAcceptanceData,
        merging_block_daa_added_blocks: &HashSet<BlockHash>,
    ) -> ConsensusResult<Option<TransactionOutput>> {
        let reward = self.calc_merged_block_reward(
            staging,
            blue_block,
            block_acceptance_data,
            merging_block_daa_added_blocks,
        )?;
        if reward == 0 {
            return Ok(None);
        }

        // The blue block's own coinbase names its miner.
        let own_coinbase = block_acceptance_data
            .transaction_acceptance_data
            .first()
            .ok_or(ConsensusError::MissingCoinbaseTransaction(*blue_block))?;
        let (_, coinbase_data, _) =
            self.extract_coinbase_data_blue_score_and_subsidy(&own_coinbase.transaction)?;

        Ok(Some(TransactionOutput {
            value: reward,
            script_public_key: coinbase_data.script_public_key,
        }))
    }
}

/// Table value for `month`, clamped to the final (zero) entry.
pub fn deflationary_subsidy_for_month(month: u64) -> u64 {
    let index = usize::try_from(month)
        .unwrap_or(usize::MAX)
        .min(SUBSIDY_TABLE_LEN - 1);
    SUBSIDY_BY_DEFLATIONARY_MONTH[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_non_increasing_and_ends_at_zero() {
        assert!(SUBSIDY_BY_DEFLATIONARY_MONTH
            .windows(2)
            .all(|pair| pair[0] >= pair[1]));
        assert_eq!(SUBSIDY_BY_DEFLATIONARY_MONTH[SUBSIDY_TABLE_LEN - 1], 0);
        assert_eq!(SUBSIDY_BY_DEFLATIONARY_MONTH[SUBSIDY_TABLE_LEN - 2], 1);
    }

    #[test]
    fn month_lookup() {
        assert_eq!(deflationary_subsidy_for_month(0), 4_400_000_000);
        assert_eq!(deflationary_subsidy_for_month(24), 2_244_897_959);
        assert_eq!(deflationary_subsidy_for_month(SUBSIDY_TABLE_LEN as u64), 0);
        assert_eq!(deflationary_subsidy_for_month(u64::MAX), 0);
    }
}
