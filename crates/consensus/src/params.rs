//! Network consensus parameters and their layered loading.

use crate::errors::ConsensusResult;
use crate::processes::coinbase_manager::SUBSIDY_BY_DEFLATIONARY_MONTH;
use config::{Config, ConfigError, Environment, File};
use kdag_types::constants::{MAX_BLOCK_LEVEL, SOMPI_PER_COIN};
use kdag_types::{hash_hex, BlockHash, BlockHeader};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment variables overriding parameters, e.g. `KDAG_HF_DAA_SCORE`.
pub const ENV_PREFIX: &str = "KDAG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConsensusParams {
    pub network_name: String,
    #[serde(with = "hash_hex")]
    pub genesis_hash: BlockHash,
    pub max_block_parents: usize,
    pub max_block_level: usize,
    /// In blocks; multiplied by the target block time to get the allowed drift.
    pub timestamp_deviation_tolerance: u64,
    pub target_time_per_block_ms: u64,
    /// DAA score from which headers must carry the KHashV2 block version.
    pub hf_daa_score: u64,
    pub subsidy_genesis_reward: u64,
    pub pre_deflationary_phase_base_subsidy: u64,
    pub deflationary_phase_daa_score: u64,
    pub deflationary_phase_base_subsidy: u64,
    pub coinbase_payload_script_public_key_max_length: u8,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ConsensusParams {
    pub fn mainnet() -> Self {
        Self {
            network_name: "kdag-mainnet".to_string(),
            genesis_hash: mainnet_genesis_header().hash(),
            max_block_parents: 10,
            max_block_level: MAX_BLOCK_LEVEL,
            timestamp_deviation_tolerance: 132,
            target_time_per_block_ms: 1_000,
            hf_daa_score: 26_962_009,
            subsidy_genesis_reward: SOMPI_PER_COIN,
            pre_deflationary_phase_base_subsidy: 50 * SOMPI_PER_COIN,
            deflationary_phase_daa_score: 15_519_600,
            deflationary_phase_base_subsidy: 4_400_000_000,
            coinbase_payload_script_public_key_max_length: 150,
        }
    }

    /// Devnet activates the KHashV2 rules from the first block.
    pub fn devnet() -> Self {
        Self {
            network_name: "kdag-devnet".to_string(),
            genesis_hash: devnet_genesis_header().hash(),
            hf_daa_score: 0,
            ..Self::mainnet()
        }
    }

    /// Load mainnet defaults, then an optional TOML file, then `KDAG_*` variables.
    pub fn load(path: Option<&Path>) -> ConsensusResult<Self> {
        Self::load_with_base(Self::mainnet(), path)
    }

    pub fn load_with_base(base: Self, path: Option<&Path>) -> ConsensusResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&base)?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let params: Self = builder.build()?.try_deserialize()?;
        params.validate()?;
        tracing::debug!(network = %params.network_name, "loaded consensus params");
        Ok(params)
    }

    pub fn validate(&self) -> ConsensusResult<()> {
        if self.max_block_parents == 0 {
            return Err(invalid("max_block_parents must be at least 1"));
        }
        if self.target_time_per_block_ms == 0 {
            return Err(invalid("target_time_per_block_ms must be positive"));
        }
        if self.deflationary_phase_base_subsidy != SUBSIDY_BY_DEFLATIONARY_MONTH[0] {
            return Err(invalid(format!(
                "deflationary_phase_base_subsidy {} does not match the compiled-in subsidy table (base {})",
                self.deflationary_phase_base_subsidy, SUBSIDY_BY_DEFLATIONARY_MONTH[0]
            )));
        }
        Ok(())
    }

    /// Maximum distance a header timestamp may lie ahead of local time.
    pub fn max_future_timestamp_drift_ms(&self) -> i64 {
        let drift = self
            .timestamp_deviation_tolerance
            .saturating_mul(self.target_time_per_block_ms);
        i64::try_from(drift).unwrap_or(i64::MAX)
    }
}

fn invalid(message: impl Into<String>) -> crate::errors::ConsensusError {
    ConfigError::Message(message.into()).into()
}

/// Genesis header of mainnet. Its hash is `ConsensusParams::mainnet().genesis_hash`.
pub fn mainnet_genesis_header() -> BlockHeader {
    genesis_header(1_700_000_000_000, 0x3392c)
}

pub fn devnet_genesis_header() -> BlockHeader {
    genesis_header(1_700_000_000_000, 0x48e5e)
}

fn genesis_header(timestamp: i64, nonce: u64) -> BlockHeader {
    BlockHeader {
        version: 0,
        parents: vec![],
        hash_merkle_root: [0u8; 32],
        accepted_id_merkle_root: [0u8; 32],
        utxo_commitment: [0u8; 32],
        timestamp,
        bits: 0x1e7f_ffff,
        nonce,
        daa_score: 0,
        blue_work: 0,
        blue_score: 0,
        pruning_point: [0u8; 32],
    }
}
