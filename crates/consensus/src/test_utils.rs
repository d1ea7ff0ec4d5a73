//! Fixtures shared by unit and integration tests.

use blake2::{digest::consts::U32, Blake2b, Digest};
use kdag_types::constants::{BLOCK_VERSION_KHASH_V1, MAX_SCRIPT_PUBLIC_KEY_VERSION};
use kdag_types::{BlockHash, BlockHeader, ScriptPublicKey};

pub const OP_TRUE: u8 = 0x51;
pub const OP_BLAKE2B: u8 = 0xaa;
pub const OP_DATA_32: u8 = 0x20;
pub const OP_EQUAL: u8 = 0x87;

/// Pay-to-script-hash script over `redeem_script`.
pub fn pay_to_script_hash_script(redeem_script: &[u8]) -> Vec<u8> {
    let digest = Blake2b::<U32>::digest(redeem_script);
    let mut script = Vec::with_capacity(35);
    script.push(OP_BLAKE2B);
    script.push(OP_DATA_32);
    script.extend_from_slice(&digest);
    script.push(OP_EQUAL);
    script
}

/// Anyone-can-spend P2SH script public key and its redeem script.
pub fn op_true_script() -> (ScriptPublicKey, Vec<u8>) {
    let redeem_script = vec![OP_TRUE];
    let script_public_key = ScriptPublicKey::new(
        MAX_SCRIPT_PUBLIC_KEY_VERSION,
        pay_to_script_hash_script(&redeem_script),
    );
    (script_public_key, redeem_script)
}

/// Non-genesis header with the given parents at level 0.
pub fn header_with_parents(parents: Vec<BlockHash>, daa_score: u64, timestamp: i64) -> BlockHeader {
    BlockHeader {
        version: BLOCK_VERSION_KHASH_V1,
        parents: vec![parents],
        hash_merkle_root: [0u8; 32],
        accepted_id_merkle_root: [0u8; 32],
        utxo_commitment: [0u8; 32],
        timestamp,
        bits: 0x1e7f_ffff,
        nonce: daa_score,
        daa_score,
        blue_work: daa_score as u128,
        blue_score: daa_score,
        pruning_point: [0u8; 32],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_true_script_shape() {
        let (spk, redeem) = op_true_script();
        assert_eq!(redeem, vec![OP_TRUE]);
        assert_eq!(spk.version, 0);
        assert_eq!(spk.script.len(), 35);
        assert_eq!(spk.script[0], OP_BLAKE2B);
        assert_eq!(spk.script[1], OP_DATA_32);
        assert_eq!(spk.script[34], OP_EQUAL);
        assert_ne!(&spk.script[2..34], &[0u8; 32]);
    }
}
