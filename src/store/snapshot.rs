//! Snapshot encoding
//!
//! The persisted blob is a small JSON envelope:
//!
//! ```json
//! { "version": 1, "state": { "chartType": "bar", "rows": [], ... } }
//! ```
//!
//! The version is checked before the state is parsed, so a snapshot from an
//! incompatible build is reported as [`DataChartsError::UnsupportedVersion`]
//! rather than a parse error.

use super::state::SessionState;
use crate::error::{DataChartsError, Result};
use serde::{Deserialize, Serialize};

/// Blob name the session is stored under
pub const SNAPSHOT_NAME: &str = "data-charts/config";

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a SessionState,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: serde_json::Value,
}

/// Serialize the persisted fields of `state`
pub fn encode(state: &SessionState) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Parse a snapshot; the returned state has `loading` set
pub fn decode(bytes: &[u8]) -> Result<SessionState> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(DataChartsError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.state)?)
}
