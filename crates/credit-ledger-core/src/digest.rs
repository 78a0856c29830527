//! Content digest of an event log.
//!
//! Two logs with the same digest hold the same events in the same recording
//! order, and therefore answer every balance query identically.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical::canonical_event_bytes;
use crate::error::CoreError;
use crate::event::RecordedEvent;

const DOMAIN: &[u8] = b"credit-ledger-log-v0:";

/// A 32-byte Blake3 digest over the canonical encoding of a log.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogDigest(pub [u8; 32]);

impl LogDigest {
    /// Digest a sequence of recorded events in the order given.
    pub fn of<'a>(
        events: impl IntoIterator<Item = &'a RecordedEvent>,
    ) -> Result<Self, CoreError> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(DOMAIN);
        for recorded in events {
            hasher.update(&canonical_event_bytes(recorded)?);
        }
        Ok(Self(*hasher.finalize().as_bytes()))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for LogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for LogDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for LogDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
