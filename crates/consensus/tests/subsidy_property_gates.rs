use kdag_consensus::processes::coinbase_manager::{
    deflationary_subsidy_for_month, extract_coinbase_data_blue_score_and_subsidy,
    serialize_coinbase_payload, CoinbaseManager, COINBASE_PAYLOAD_FIXED_LEN, SECONDS_PER_MONTH,
    SUBSIDY_TABLE_LEN,
};
use kdag_consensus::{ConsensusParams, SUBSIDY_BY_DEFLATIONARY_MONTH};
use kdag_storage::MemoryStorage;
use kdag_types::constants::MAX_SOMPI;
use kdag_types::{CoinbaseData, DomainTransaction, ScriptPublicKey, SUBNETWORK_ID_COINBASE};
use proptest::prelude::*;
use std::sync::Arc;
use tracing::Span;

// Property gates for the emission schedule and the coinbase payload codec.
// These must hold for every DAA score, not just the hand-picked boundaries.

fn manager() -> CoinbaseManager {
    let storage = Arc::new(MemoryStorage::new());
    CoinbaseManager::new(
        &ConsensusParams::mainnet(),
        storage.clone(),
        storage.clone(),
        storage.clone(),
        storage,
        Span::none(),
    )
}

fn coinbase(payload: Vec<u8>) -> DomainTransaction {
    DomainTransaction {
        version: 0,
        inputs: vec![],
        outputs: vec![],
        lock_time: 0,
        subnetwork_id: SUBNETWORK_ID_COINBASE,
        gas: 0,
        payload,
    }
}

proptest! {
    #[test]
    fn subsidy_never_increases_with_daa_score(a in any::<u64>(), b in any::<u64>()) {
        let manager = manager();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let params = ConsensusParams::mainnet();

        let low_subsidy = manager.subsidy_at_daa_score(low);
        let high_subsidy = manager.subsidy_at_daa_score(high);

        if low >= params.deflationary_phase_daa_score {
            prop_assert!(high_subsidy <= low_subsidy);
        }
        if high < params.deflationary_phase_daa_score {
            prop_assert_eq!(low_subsidy, params.pre_deflationary_phase_base_subsidy);
            prop_assert_eq!(high_subsidy, params.pre_deflationary_phase_base_subsidy);
        }
    }
}

proptest! {
    #[test]
    fn subsidy_is_constant_within_a_month(month in 0u64..(SUBSIDY_TABLE_LEN as u64 + 5), offset in 0u64..SECONDS_PER_MONTH) {
        let manager = manager();
        let start = ConsensusParams::mainnet().deflationary_phase_daa_score + month * SECONDS_PER_MONTH;

        prop_assert_eq!(manager.subsidy_at_daa_score(start), manager.subsidy_at_daa_score(start + offset));
        prop_assert_eq!(manager.subsidy_at_daa_score(start), deflationary_subsidy_for_month(month));
    }
}

proptest! {
    #[test]
    fn month_lookup_clamps_to_final_zero(month in (SUBSIDY_TABLE_LEN as u64 - 1)..=u64::MAX) {
        prop_assert_eq!(deflationary_subsidy_for_month(month), 0);
    }
}

proptest! {
    #[test]
    fn table_entries_stay_within_supply(month in 0usize..SUBSIDY_TABLE_LEN) {
        let subsidy = SUBSIDY_BY_DEFLATIONARY_MONTH[month];
        prop_assert!(subsidy <= SUBSIDY_BY_DEFLATIONARY_MONTH[0]);
        prop_assert!(subsidy < MAX_SOMPI);
    }
}

proptest! {
    #[test]
    fn payload_codec_preserves_fields(
        blue_score in any::<u64>(),
        subsidy in any::<u64>(),
        version in any::<u16>(),
        script in proptest::collection::vec(any::<u8>(), 0..=150),
        extra_data in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let data = CoinbaseData {
            script_public_key: ScriptPublicKey::new(version, script),
            extra_data,
        };
        let payload = serialize_coinbase_payload(blue_score, &data, subsidy, 150).unwrap();
        prop_assert_eq!(
            payload.len(),
            COINBASE_PAYLOAD_FIXED_LEN + data.script_public_key.script.len() + data.extra_data.len()
        );

        let (decoded_blue_score, decoded, decoded_subsidy) =
            extract_coinbase_data_blue_score_and_subsidy(&coinbase(payload), 150).unwrap();
        prop_assert_eq!(decoded_blue_score, blue_score);
        prop_assert_eq!(decoded_subsidy, subsidy);
        prop_assert_eq!(decoded, data);
    }
}

proptest! {
    #[test]
    fn truncated_payloads_never_panic(payload in proptest::collection::vec(any::<u8>(), 0..200)) {
        // Any outcome is fine as long as it is a value, not a panic.
        let result = extract_coinbase_data_blue_score_and_subsidy(&coinbase(payload.clone()), 150);
        if payload.len() < COINBASE_PAYLOAD_FIXED_LEN {
            prop_assert!(result.is_err());
        }
    }
}
