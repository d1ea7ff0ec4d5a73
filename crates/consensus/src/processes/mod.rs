pub mod block_validator;
pub mod coinbase_manager;
pub mod consensus_state_manager;
pub mod dag_traversal_manager;
pub mod parents_manager;
