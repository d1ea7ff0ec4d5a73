use kdag_consensus::processes::coinbase_manager::{serialize_coinbase_payload, CoinbaseManager};
use kdag_consensus::test_utils::{header_with_parents, op_true_script};
use kdag_consensus::ConsensusParams;
use kdag_storage::{
    AcceptanceDataStore, BlockStore, DaaBlocksStore, GhostdagDataStore, MemoryStorage, StagingArea,
};
use kdag_types::{
    Block, BlockAcceptanceData, BlockHash, CoinbaseData, DomainTransaction, GhostdagData,
    ScriptPublicKey, TransactionAcceptanceData, SUBNETWORK_ID_COINBASE, SUBNETWORK_ID_NATIVE,
};
use proptest::prelude::*;
use std::sync::Arc;
use tracing::Span;

// Output accounting of the expected coinbase over random merge sets.

const MERGING_BLOCK: BlockHash = [0xf0; 32];

#[derive(Debug, Clone)]
struct Merged {
    is_blue: bool,
    in_daa_window: bool,
    subsidy: u64,
    fees: Vec<(u64, bool)>,
}

impl Merged {
    fn reward(&self) -> u64 {
        if !self.in_daa_window {
            return 0;
        }
        self.subsidy
            + self
                .fees
                .iter()
                .filter(|(_, is_accepted)| *is_accepted)
                .map(|(fee, _)| fee)
                .sum::<u64>()
    }
}

fn merged_block() -> impl Strategy<Value = Merged> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![Just(0u64), 0u64..=5_000_000_000],
        proptest::collection::vec((0u64..1_000_000, any::<bool>()), 0..4),
    )
        .prop_map(|(is_blue, in_daa_window, subsidy, fees)| Merged {
            is_blue,
            in_daa_window,
            subsidy,
            fees,
        })
}

fn miner_script(hash: &BlockHash) -> ScriptPublicKey {
    ScriptPublicKey::new(0, vec![0x51, hash[0]])
}

fn transaction(subnetwork_id: kdag_types::SubnetworkId, payload: Vec<u8>) -> DomainTransaction {
    DomainTransaction {
        version: 0,
        inputs: vec![],
        outputs: vec![],
        lock_time: 0,
        subnetwork_id,
        gas: 0,
        payload,
    }
}

fn stage(storage: &MemoryStorage, staging: &mut StagingArea, members: &[Merged]) {
    let mut blues = Vec::new();
    let mut reds = Vec::new();
    let mut daa_added = Vec::new();
    let mut acceptance = Vec::new();

    for (i, member) in members.iter().enumerate() {
        let hash = [i as u8 + 1; 32];
        let data = CoinbaseData {
            script_public_key: miner_script(&hash),
            extra_data: vec![],
        };
        let payload = serialize_coinbase_payload(1, &data, member.subsidy, 150).unwrap();
        let coinbase = transaction(SUBNETWORK_ID_COINBASE, payload);
        storage.stage_block(
            staging,
            hash,
            Block::new(header_with_parents(vec![[0u8; 32]], 1, 0), vec![coinbase.clone()]),
        );

        let mut transaction_acceptance_data = vec![TransactionAcceptanceData {
            transaction: coinbase,
            fee: 0,
            is_accepted: true,
        }];
        for (n, (fee, is_accepted)) in member.fees.iter().enumerate() {
            transaction_acceptance_data.push(TransactionAcceptanceData {
                transaction: transaction(SUBNETWORK_ID_NATIVE, vec![n as u8]),
                fee: *fee,
                is_accepted: *is_accepted,
            });
        }
        acceptance.push(BlockAcceptanceData {
            block_hash: hash,
            transaction_acceptance_data,
        });

        if member.is_blue {
            blues.push(hash);
        } else {
            reds.push(hash);
        }
        if member.in_daa_window {
            daa_added.push(hash);
        }
    }

    let selected_parent = blues.first().copied().unwrap_or([0u8; 32]);
    storage.stage_ghostdag_data(
        staging,
        MERGING_BLOCK,
        GhostdagData::new(100, 100, selected_parent, blues, reds),
        false,
    );
    storage.stage_acceptance_data(staging, MERGING_BLOCK, acceptance);
    storage.stage_daa_added_blocks(staging, MERGING_BLOCK, daa_added);
    storage.stage_daa_score(staging, MERGING_BLOCK, 1_000);
}

proptest! {
    #[test]
    fn outputs_add_up_to_in_window_rewards(members in proptest::collection::vec(merged_block(), 0..10)) {
        let storage = Arc::new(MemoryStorage::new());
        let manager = CoinbaseManager::new(
            &ConsensusParams::mainnet(),
            storage.clone(),
            storage.clone(),
            storage.clone(),
            storage.clone(),
            Span::none(),
        );
        let mut staging = StagingArea::new();
        stage(&storage, &mut staging, &members);

        let miner = CoinbaseData {
            script_public_key: op_true_script().0,
            extra_data: vec![],
        };
        let (tx, has_red_reward) = manager
            .expected_coinbase_transaction(&staging, &MERGING_BLOCK, &miner)
            .unwrap();

        let expected_total: u64 = members.iter().map(Merged::reward).sum();
        let red_total: u64 = members.iter().filter(|m| !m.is_blue).map(Merged::reward).sum();
        let paid_blues = members.iter().filter(|m| m.is_blue && m.reward() > 0).count();

        prop_assert!(tx.outputs.iter().all(|output| output.value > 0));
        prop_assert_eq!(tx.outputs.iter().map(|output| output.value).sum::<u64>(), expected_total);
        prop_assert_eq!(has_red_reward, red_total > 0);
        prop_assert_eq!(tx.outputs.len(), paid_blues + usize::from(red_total > 0));

        // Blue outputs come first, in merge-set order, each to its own miner.
        let blue_outputs: Vec<(u64, ScriptPublicKey)> = members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_blue && m.reward() > 0)
            .map(|(i, m)| (m.reward(), miner_script(&[i as u8 + 1; 32])))
            .collect();
        let paid: Vec<(u64, ScriptPublicKey)> = tx
            .outputs
            .iter()
            .take(paid_blues)
            .map(|output| (output.value, output.script_public_key.clone()))
            .collect();
        prop_assert_eq!(paid, blue_outputs);
        if red_total > 0 {
            prop_assert_eq!(&tx.outputs[paid_blues].script_public_key, &miner.script_public_key);
        }
    }
}
