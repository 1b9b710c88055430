//! Canonical proposal construction.
//!
//! Pure data transformation: no network I/O happens here. The transaction id
//! is derived once, from a fresh nonce and the creator bytes, and the same
//! id is threaded immutably through endorse, submit, and commit-status.

use std::time::{SystemTime, UNIX_EPOCH};

use prost::Message;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::wire::{
    ChaincodeId, ChaincodeInput, ChaincodeInvocationSpec, ChaincodeProposalPayload, ChaincodeSpec,
    ChannelHeader, HEADER_TYPE_ENDORSER_TRANSACTION, Header, Proposal, SignatureHeader,
};

/// Nonce length used for transaction id derivation.
const NONCE_LENGTH: usize = 24;

/// Assembles the canonical byte encoding of one chaincode invocation.
pub struct ProposalBuilder {
    channel_id: String,
    chaincode_id: String,
    contract_name: Option<String>,
    transaction_name: String,
    arguments: Vec<Vec<u8>>,
    creator: Vec<u8>,
}

/// A built proposal: its stable transaction id and canonical bytes, ready to
/// be digested and signed for endorsement.
#[derive(Debug, Clone)]
pub struct UnsignedProposal {
    pub transaction_id: String,
    pub channel_id: String,
    pub proposal_bytes: Vec<u8>,
}

impl ProposalBuilder {
    pub fn new(
        channel_id: impl Into<String>,
        chaincode_id: impl Into<String>,
        creator: Vec<u8>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            chaincode_id: chaincode_id.into(),
            contract_name: None,
            transaction_name: String::new(),
            arguments: Vec::new(),
            creator,
        }
    }

    /// Qualify the transaction name with a named contract within the
    /// chaincode.
    pub fn contract_name(mut self, name: Option<String>) -> Self {
        self.contract_name = name;
        self
    }

    pub fn transaction_name(mut self, name: impl Into<String>) -> Self {
        self.transaction_name = name.into();
        self
    }

    /// Invocation arguments after the transaction name, passed through
    /// byte-for-byte.
    pub fn arguments(mut self, arguments: Vec<Vec<u8>>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn build(self) -> UnsignedProposal {
        let mut nonce = vec![0u8; NONCE_LENGTH];
        rand::thread_rng().fill_bytes(&mut nonce);
        let transaction_id = derive_transaction_id(&nonce, &self.creator);

        let qualified_name = match &self.contract_name {
            Some(contract) => format!("{}:{}", contract, self.transaction_name),
            None => self.transaction_name.clone(),
        };

        let mut args = Vec::with_capacity(self.arguments.len() + 1);
        args.push(qualified_name.into_bytes());
        args.extend(self.arguments);

        let invocation = ChaincodeInvocationSpec {
            chaincode_spec: Some(ChaincodeSpec {
                chaincode_id: Some(ChaincodeId {
                    name: self.chaincode_id,
                }),
                input: Some(ChaincodeInput { args }),
            }),
        };

        let channel_header = ChannelHeader {
            header_type: HEADER_TYPE_ENDORSER_TRANSACTION,
            timestamp: Some(current_timestamp()),
            channel_id: self.channel_id.clone(),
            tx_id: transaction_id.clone(),
        };
        let signature_header = SignatureHeader {
            creator: self.creator,
            nonce,
        };
        let header = Header {
            channel_header: channel_header.encode_to_vec(),
            signature_header: signature_header.encode_to_vec(),
        };
        let payload = ChaincodeProposalPayload {
            input: invocation.encode_to_vec(),
        };
        let proposal = Proposal {
            header: header.encode_to_vec(),
            payload: payload.encode_to_vec(),
        };

        UnsignedProposal {
            transaction_id,
            channel_id: self.channel_id,
            proposal_bytes: proposal.encode_to_vec(),
        }
    }
}

/// Transaction id: hex-encoded SHA-256 of the nonce followed by the creator
/// bytes. Stable for the whole transaction lifecycle.
fn derive_transaction_id(nonce: &[u8], creator: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(creator);
    hex::encode(hasher.finalize())
}

fn current_timestamp() -> prost_types::Timestamp {
    // A pre-epoch clock degrades to the zero timestamp rather than failing
    // proposal construction.
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    prost_types::Timestamp {
        seconds: now.as_secs() as i64,
        nanos: now.subsec_nanos() as i32,
    }
}
