use serde::{Deserialize, Serialize};
use std::fmt;

/// Length in bytes of a subnetwork identifier.
pub const SUBNETWORK_ID_LENGTH: usize = 20;

/// Identifier of the subnetwork a transaction belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubnetworkId(pub [u8; SUBNETWORK_ID_LENGTH]);

impl SubnetworkId {
    pub const fn from_byte(first: u8) -> Self {
        let mut bytes = [0u8; SUBNETWORK_ID_LENGTH];
        bytes[0] = first;
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SUBNETWORK_ID_LENGTH] {
        &self.0
    }

    /// Built-in subnetworks are the native, coinbase and registry ones.
    pub fn is_builtin(&self) -> bool {
        *self == SUBNETWORK_ID_COINBASE || *self == SUBNETWORK_ID_REGISTRY
    }
}

impl fmt::Display for SubnetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

pub const SUBNETWORK_ID_NATIVE: SubnetworkId = SubnetworkId([0u8; SUBNETWORK_ID_LENGTH]);
pub const SUBNETWORK_ID_COINBASE: SubnetworkId = SubnetworkId::from_byte(1);
pub const SUBNETWORK_ID_REGISTRY: SubnetworkId = SubnetworkId::from_byte(2);

/// Versioned locking script attached to an output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ScriptPublicKey {
    pub version: u16,
    pub script: Vec<u8>,
}

impl ScriptPublicKey {
    pub fn new(version: u16, script: Vec<u8>) -> Self {
        Self { version, script }
    }
}

/// Reference to a previous transaction output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Outpoint {
    pub transaction_id: [u8; 32],
    pub index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionInput {
    pub previous_outpoint: Outpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u64,
    pub sig_op_count: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Amount in sompi.
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
}

/// Transaction as seen by consensus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainTransaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,
    pub subnetwork_id: SubnetworkId,
    pub gas: u64,
    pub payload: Vec<u8>,
}

impl DomainTransaction {
    pub fn is_coinbase(&self) -> bool {
        self.subnetwork_id == SUBNETWORK_ID_COINBASE
    }

    /// Deterministic little-endian serialization of every field.
    ///
    /// Two transactions are considered identical by consensus iff these bytes match.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64 + self.payload.len());
        out.extend_from_slice(&self.version.to_le_bytes());

        out.extend_from_slice(&(self.inputs.len() as u64).to_le_bytes());
        for input in &self.inputs {
            out.extend_from_slice(&input.previous_outpoint.transaction_id);
            out.extend_from_slice(&input.previous_outpoint.index.to_le_bytes());
            write_var_bytes(&mut out, &input.signature_script);
            out.extend_from_slice(&input.sequence.to_le_bytes());
            out.push(input.sig_op_count);
        }

        out.extend_from_slice(&(self.outputs.len() as u64).to_le_bytes());
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            out.extend_from_slice(&output.script_public_key.version.to_le_bytes());
            write_var_bytes(&mut out, &output.script_public_key.script);
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out.extend_from_slice(self.subnetwork_id.as_bytes());
        out.extend_from_slice(&self.gas.to_le_bytes());
        write_var_bytes(&mut out, &self.payload);
        out
    }

    /// Transaction identifier: blake3 over the canonical bytes.
    pub fn id(&self) -> [u8; 32] {
        *blake3::hash(&self.to_canonical_bytes()).as_bytes()
    }
}

fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
    out.extend_from_slice(bytes);
}

/// Miner-supplied data carried in a coinbase payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoinbaseData {
    pub script_public_key: ScriptPublicKey,
    pub extra_data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinbase(payload: Vec<u8>) -> DomainTransaction {
        DomainTransaction {
            version: 0,
            inputs: vec![],
            outputs: vec![TransactionOutput {
                value: 50,
                script_public_key: ScriptPublicKey::new(0, vec![0x51]),
            }],
            lock_time: 0,
            subnetwork_id: SUBNETWORK_ID_COINBASE,
            gas: 0,
            payload,
        }
    }

    #[test]
    fn subnetwork_constants() {
        assert_eq!(SUBNETWORK_ID_NATIVE.0, [0u8; 20]);
        assert_eq!(SUBNETWORK_ID_COINBASE.0[0], 1);
        assert_eq!(SUBNETWORK_ID_REGISTRY.0[0], 2);
        assert!(SUBNETWORK_ID_COINBASE.is_builtin());
        assert!(!SUBNETWORK_ID_NATIVE.is_builtin());
        assert_eq!(
            SUBNETWORK_ID_COINBASE.to_string(),
            format!("01{}", "00".repeat(19))
        );
    }

    #[test]
    fn coinbase_detection() {
        let mut tx = coinbase(vec![]);
        assert!(tx.is_coinbase());
        tx.subnetwork_id = SUBNETWORK_ID_NATIVE;
        assert!(!tx.is_coinbase());
    }

    #[test]
    fn canonical_bytes_distinguish_payload_and_outputs() {
        let a = coinbase(vec![1, 2, 3]);
        let b = coinbase(vec![1, 2, 4]);
        assert_ne!(a.to_canonical_bytes(), b.to_canonical_bytes());
        assert_ne!(a.id(), b.id());

        let mut c = a.clone();
        c.outputs[0].value += 1;
        assert_ne!(a.to_canonical_bytes(), c.to_canonical_bytes());

        assert_eq!(a.to_canonical_bytes(), a.clone().to_canonical_bytes());
    }

    #[test]
    fn canonical_bytes_are_length_prefixed() {
        // Moving a byte from the script into the payload must not collide.
        let mut a = coinbase(vec![0x52]);
        a.outputs[0].script_public_key.script = vec![0x51];
        let mut b = coinbase(vec![]);
        b.outputs[0].script_public_key.script = vec![0x51, 0x52];
        assert_ne!(a.to_canonical_bytes(), b.to_canonical_bytes());
    }
}
