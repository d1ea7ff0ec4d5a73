use crate::model::ParentsManager;
use kdag_types::{BlockHash, BlockHeader, BlockLevelParents};

/// Headers leave levels above their highest parent empty; those read as genesis.
pub struct GenesisAwareParentsManager {
    genesis_hash: BlockHash,
    max_block_level: usize,
}

impl GenesisAwareParentsManager {
    pub fn new(genesis_hash: BlockHash, max_block_level: usize) -> Self {
        Self {
            genesis_hash,
            max_block_level,
        }
    }
}

impl ParentsManager for GenesisAwareParentsManager {
    fn parents_at_level(&self, header: &BlockHeader, level: usize) -> BlockLevelParents {
        let parents = header.parents_at_level(level);
        if parents.is_empty() && !header.direct_parents().is_empty() {
            return vec![self.genesis_hash];
        }
        parents.to_vec()
    }

    fn parents(&self, header: &BlockHeader) -> Vec<BlockLevelParents> {
        (0..=self.max_block_level)
            .map(|level| self.parents_at_level(header, level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::mainnet_genesis_header;
    use crate::test_utils::header_with_parents;

    #[test]
    fn empty_levels_become_genesis() {
        let manager = GenesisAwareParentsManager::new([0xaa; 32], 3);
        let mut header = header_with_parents(vec![[1u8; 32], [2u8; 32]], 10, 0);
        header.parents.push(vec![[3u8; 32]]);

        assert_eq!(manager.parents_at_level(&header, 0), vec![[1u8; 32], [2u8; 32]]);
        assert_eq!(manager.parents_at_level(&header, 1), vec![[3u8; 32]]);
        assert_eq!(manager.parents_at_level(&header, 2), vec![[0xaa; 32]]);

        let all = manager.parents(&header);
        assert_eq!(all.len(), 4);
        assert_eq!(all[3], vec![[0xaa; 32]]);
    }

    #[test]
    fn genesis_keeps_empty_levels() {
        let manager = GenesisAwareParentsManager::new([0xaa; 32], 2);
        let genesis = mainnet_genesis_header();
        assert!(manager.parents(&genesis).iter().all(Vec::is_empty));
    }
}
