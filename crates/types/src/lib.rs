pub mod block;
pub mod constants;
pub mod ghostdag;
pub mod transaction;

pub use block::*;
pub use ghostdag::*;
pub use transaction::*;
