use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Workchain prefix used in the raw textual form of a principal.
const RAW_PREFIX: &str = "0:";

/// A 32-byte account identifier.
///
/// Principals name every party the lockup deals with: the administrator, the
/// claimer, and the external asset holding that actually keeps the tokens.
/// The message transport attributes a verified `Principal` to each inbound
/// operation; the lockup only ever compares them for equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal {
    hash: [u8; 32],
}

impl Principal {
    /// Wrap raw account bytes.
    pub const fn from_raw(hash: [u8; 32]) -> Self {
        Self { hash }
    }

    /// Derive a principal deterministically from a label.
    ///
    /// Used by tests, demos, and simulations that need stable, distinct
    /// parties without real key material.
    pub fn derive(label: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"vest-principal-v1:");
        hasher.update(label.as_bytes());
        Self {
            hash: *hasher.finalize().as_bytes(),
        }
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Full hex-encoded account bytes, without the workchain prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("{RAW_PREFIX}{}", hex::encode(&self.hash[..4]))
    }

    /// Parse from `0:<64 hex>` or bare hex.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.trim();
        let s = s.strip_prefix(RAW_PREFIX).unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { hash: arr })
    }
}

impl FromStr for Principal {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).map_err(|e| TypeError::InvalidPrincipal(format!("{s:?}: {e}")))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.short_id())
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RAW_PREFIX}{}", self.to_hex())
    }
}
