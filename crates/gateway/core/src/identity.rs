//! Client identity used as the creator of every proposal.

use prost::Message;

use crate::wire::SerializedIdentity;

/// A client identity: membership service provider id plus opaque credential
/// bytes (typically a PEM certificate).
///
/// Immutable once constructed. Parsing or validating the credential is the
/// caller's concern; this type only carries and serializes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    msp_id: String,
    credentials: Vec<u8>,
}

impl Identity {
    pub fn new(msp_id: impl Into<String>, credentials: impl Into<Vec<u8>>) -> Self {
        Self {
            msp_id: msp_id.into(),
            credentials: credentials.into(),
        }
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn credentials(&self) -> &[u8] {
        &self.credentials
    }

    /// Deterministic creator encoding embedded in proposal signature headers.
    pub fn serialize(&self) -> Vec<u8> {
        SerializedIdentity {
            msp_id: self.msp_id.clone(),
            id_bytes: self.credentials.clone(),
        }
        .encode_to_vec()
    }
}
