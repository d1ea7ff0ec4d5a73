//! Coinbase payload layout (little-endian):
//!
//! `blue_score: u64 | subsidy: u64 | spk_version: u16 | script_len: u8 | script | extra_data`

use crate::errors::RuleError;
use kdag_types::{CoinbaseData, DomainTransaction, ScriptPublicKey};

const UINT64_LEN: usize = 8;
const UINT16_LEN: usize = 2;
const LENGTH_OF_SCRIPT_PUBLIC_KEY_LENGTH: usize = 1;

/// Bytes before the script: blue score, subsidy, script version and script length.
pub const COINBASE_PAYLOAD_FIXED_LEN: usize =
    UINT64_LEN + UINT64_LEN + UINT16_LEN + LENGTH_OF_SCRIPT_PUBLIC_KEY_LENGTH;

pub fn serialize_coinbase_payload(
    blue_score: u64,
    coinbase_data: &CoinbaseData,
    subsidy: u64,
    max_script_len: u8,
) -> Result<Vec<u8>, RuleError> {
    let script = &coinbase_data.script_public_key.script;
    let script_len = u8::try_from(script.len())
        .ok()
        .filter(|len| *len <= max_script_len)
        .ok_or_else(|| {
            RuleError::BadCoinbasePayloadLen(format!(
                "coinbase's payload script public key is longer than the max allowed length of {max_script_len}"
            ))
        })?;

    let mut payload =
        Vec::with_capacity(COINBASE_PAYLOAD_FIXED_LEN + script.len() + coinbase_data.extra_data.len());
    payload.extend_from_slice(&blue_score.to_le_bytes());
    payload.extend_from_slice(&subsidy.to_le_bytes());
    payload.extend_from_slice(&coinbase_data.script_public_key.version.to_le_bytes());
    payload.push(script_len);
    payload.extend_from_slice(script);
    payload.extend_from_slice(&coinbase_data.extra_data);
    Ok(payload)
}

/// Returns `(blue_score, coinbase_data, subsidy)` from a coinbase transaction's payload.
pub fn extract_coinbase_data_blue_score_and_subsidy(
    coinbase_tx: &DomainTransaction,
    max_script_len: u8,
) -> Result<(u64, CoinbaseData, u64), RuleError> {
    let payload = &coinbase_tx.payload;
    if payload.len() < COINBASE_PAYLOAD_FIXED_LEN {
        return Err(RuleError::BadCoinbasePayloadLen(format!(
            "coinbase payload is less than the minimum length of {COINBASE_PAYLOAD_FIXED_LEN}"
        )));
    }

    let (blue_score_bytes, rest) = payload.split_at(UINT64_LEN);
    let (subsidy_bytes, rest) = rest.split_at(UINT64_LEN);
    let (version_bytes, rest) = rest.split_at(UINT16_LEN);
    let script_len = rest[0];
    let rest = &rest[LENGTH_OF_SCRIPT_PUBLIC_KEY_LENGTH..];

    if script_len > max_script_len {
        return Err(RuleError::BadCoinbasePayloadLen(format!(
            "coinbase's payload script public key is longer than the max allowed length of {max_script_len}"
        )));
    }
    let script_len = usize::from(script_len);
    if rest.len() < script_len {
        return Err(RuleError::BadCoinbasePayloadLen(format!(
            "coinbase payload doesn't have enough bytes to contain a script public key of size {script_len}"
        )));
    }
    let (script, extra_data) = rest.split_at(script_len);

    let blue_score = u64::from_le_bytes(to_array(blue_score_bytes));
    let subsidy = u64::from_le_bytes(to_array(subsidy_bytes));
    let version = u16::from_le_bytes(to_array(version_bytes));

    Ok((
        blue_score,
        CoinbaseData {
            script_public_key: ScriptPublicKey::new(version, script.to_vec()),
            extra_data: extra_data.to_vec(),
        },
        subsidy,
    ))
}

fn to_array<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kdag_types::SUBNETWORK_ID_COINBASE;

    fn tx_with_payload(payload: Vec<u8>) -> DomainTransaction {
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

    fn data(script_len: usize) -> CoinbaseData {
        CoinbaseData {
            script_public_key: ScriptPublicKey::new(0, vec![0x51; script_len]),
            extra_data: b"miner/1.0".to_vec(),
        }
    }

    #[test]
    fn layout_is_little_endian() {
        let payload = serialize_coinbase_payload(0x0102, &data(2), 0x0a0b, 150).unwrap();
        assert_eq!(&payload[0..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&payload[8..16], &[0x0b, 0x0a, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&payload[16..18], &[0, 0]);
        assert_eq!(payload[18], 2);
        assert_eq!(&payload[19..21], &[0x51, 0x51]);
        assert_eq!(&payload[21..], b"miner/1.0");
    }

    #[test]
    fn extract_reads_back_fields() {
        let payload = serialize_coinbase_payload(77, &data(35), 4_400_000_000, 150).unwrap();
        let (blue_score, coinbase_data, subsidy) =
            extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(payload), 150).unwrap();
        assert_eq!(blue_score, 77);
        assert_eq!(subsidy, 4_400_000_000);
        assert_eq!(coinbase_data, data(35));
    }

    #[test]
    fn serialize_rejects_long_script() {
        assert!(serialize_coinbase_payload(1, &data(150), 1, 150).is_ok());
        assert!(matches!(
            serialize_coinbase_payload(1, &data(151), 1, 150),
            Err(RuleError::BadCoinbasePayloadLen(_))
        ));
        assert!(serialize_coinbase_payload(1, &data(300), 1, u8::MAX).is_err());
    }

    #[test]
    fn extract_rejects_short_payload() {
        let err = extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(vec![0; 18]), 150)
            .unwrap_err();
        assert!(matches!(err, RuleError::BadCoinbasePayloadLen(_)));

        // Header claims a 10 byte script but only 3 follow.
        let mut payload = vec![0u8; COINBASE_PAYLOAD_FIXED_LEN];
        payload[18] = 10;
        payload.extend_from_slice(&[1, 2, 3]);
        assert!(extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(payload), 150).is_err());
    }

    #[test]
    fn extract_rejects_declared_script_over_max() {
        let payload = serialize_coinbase_payload(1, &data(40), 1, 150).unwrap();
        assert!(extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(payload.clone()), 39).is_err());
        assert!(extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(payload), 40).is_ok());
    }

    #[test]
    fn empty_script_and_extra_data() {
        let coinbase_data = CoinbaseData::default();
        let payload = serialize_coinbase_payload(0, &coinbase_data, 0, 150).unwrap();
        assert_eq!(payload.len(), COINBASE_PAYLOAD_FIXED_LEN);
        let (_, decoded, _) =
            extract_coinbase_data_blue_score_and_subsidy(&tx_with_payload(payload), 150).unwrap();
        assert_eq!(decoded, coinbase_data);
    }
}
