use std::fmt;

use crate::error::StateResult;
use crate::traits::WorldState;

const DOMAIN: &[u8] = b"docledger-state-v1:";

/// BLAKE3 digest over the full contents of a world state.
///
/// Two stores with the same keys and byte-identical values produce the same
/// digest regardless of how they were populated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateDigest([u8; 32]);

impl StateDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateDigest({})", hex::encode(&self.0[..4]))
    }
}

/// Hash every key/value pair of `state` in ascending key order.
///
/// Keys and values are length-prefixed so that adjacent entries cannot be
/// re-split into a different set with the same concatenation.
pub fn state_digest<S: WorldState + ?Sized>(state: &S) -> StateResult<StateDigest> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN);

    let mut scan = state.scan("", "")?;
    for entry in &mut scan {
        let kv = entry?;
        hasher.update(&(kv.key.len() as u64).to_le_bytes());
        hasher.update(kv.key.as_bytes());
        hasher.update(&(kv.value.len() as u64).to_le_bytes());
        hasher.update(&kv.value);
    }
    scan.finish()?;

    Ok(StateDigest(*hasher.finalize().as_bytes()))
}
