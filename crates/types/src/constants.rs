//! Protocol-wide constants.

/// Block version used before the KHashV2 hard fork.
pub const BLOCK_VERSION_KHASH_V1: u16 = 1;

/// Block version required from the KHashV2 hard fork DAA score onwards.
pub const BLOCK_VERSION_KHASH_V2: u16 = 2;

/// Highest block level a header may carry parents for.
pub const MAX_BLOCK_LEVEL: usize = 225;

/// Current latest supported transaction version.
pub const MAX_TRANSACTION_VERSION: u16 = 0;

/// Current latest supported script public key version.
pub const MAX_SCRIPT_PUBLIC_KEY_VERSION: u16 = 0;

/// Number of sompi in one coin.
pub const SOMPI_PER_COIN: u64 = 100_000_000;

/// Maximum number of sompi that can ever exist.
pub const MAX_SOMPI: u64 = 4_961_000_000 * SOMPI_PER_COIN;
