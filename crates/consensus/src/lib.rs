//! KDAG consensus core: header checks in isolation, expected coinbase
//! construction and the deflationary subsidy schedule.
//!
//! Processes never commit. Every call reads through the caller's
//! [`StagingArea`](kdag_storage::StagingArea) and the caller decides
//! whether to hand it to [`Consensus::commit`].

pub mod errors;
pub mod factory;
pub mod logger;
pub mod model;
pub mod params;
pub mod processes;
pub mod test_utils;
pub mod time;

pub use errors::{ConsensusError, ConsensusResult, RuleError};
pub use factory::{Consensus, ConsensusFactory};
pub use model::{DagTraversalManager, ParentsManager};
pub use params::ConsensusParams;
pub use processes::block_validator::BlockValidator;
pub use processes::coinbase_manager::{CoinbaseManager, SUBSIDY_BY_DEFLATIONARY_MONTH};
pub use processes::consensus_state_manager::ConsensusStateManager;
pub use time::{FixedTimeSource, SystemTimeSource, TimeSource};
