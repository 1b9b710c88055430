//! Protobuf messages exchanged with the gateway service.
//!
//! The messages are hand-derived with explicit field tags rather than
//! generated from `.proto` files, so the crate builds without a protoc
//! toolchain. Tags follow the ledger's channel/proposal message layout and
//! must not be renumbered: the gateway decodes these bytes.

use prost::Message;

/// Header type marker for an endorser transaction.
pub const HEADER_TYPE_ENDORSER_TRANSACTION: i32 = 3;

/// Creator identity encoding: MSP id plus opaque credential bytes.
#[derive(Clone, PartialEq, Message)]
pub struct SerializedIdentity {
    #[prost(string, tag = "1")]
    pub msp_id: String,
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

/// Channel-scoped routing header carried inside every proposal.
#[derive(Clone, PartialEq, Message)]
pub struct ChannelHeader {
    #[prost(int32, tag = "1")]
    pub header_type: i32,
    #[prost(message, optional, tag = "3")]
    pub timestamp: Option<prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub channel_id: String,
    #[prost(string, tag = "5")]
    pub tx_id: String,
}

/// Identifies who created a proposal and with what nonce.
#[derive(Clone, PartialEq, Message)]
pub struct SignatureHeader {
    #[prost(bytes = "vec", tag = "1")]
    pub creator: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub nonce: Vec<u8>,
}

/// Proposal header: serialized channel header plus signature header.
#[derive(Clone, PartialEq, Message)]
pub struct Header {
    #[prost(bytes = "vec", tag = "1")]
    pub channel_header: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature_header: Vec<u8>,
}

/// Names the deployed chaincode a proposal targets.
#[derive(Clone, PartialEq, Message)]
pub struct ChaincodeId {
    #[prost(string, tag = "2")]
    pub name: String,
}

/// Ordered invocation arguments. The first argument is the transaction name
/// (optionally qualified by a contract name); the rest pass through verbatim.
#[derive(Clone, PartialEq, Message)]
pub struct ChaincodeInput {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub args: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ChaincodeSpec {
    #[prost(message, optional, tag = "2")]
    pub chaincode_id: Option<ChaincodeId>,
    #[prost(message, optional, tag = "3")]
    pub input: Option<ChaincodeInput>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ChaincodeInvocationSpec {
    #[prost(message, optional, tag = "1")]
    pub chaincode_spec: Option<ChaincodeSpec>,
}

/// Proposal payload: the serialized invocation spec.
#[derive(Clone, PartialEq, Message)]
pub struct ChaincodeProposalPayload {
    #[prost(bytes = "vec", tag = "1")]
    pub input: Vec<u8>,
}

/// The unsigned proposal: serialized [`Header`] plus serialized
/// [`ChaincodeProposalPayload`].
#[derive(Clone, PartialEq, Message)]
pub struct Proposal {
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
}

/// A proposal plus the signature over its digest.
#[derive(Clone, PartialEq, Message)]
pub struct SignedProposal {
    #[prost(bytes = "vec", tag = "1")]
    pub proposal_bytes: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

/// An endorsed transaction envelope awaiting submission for ordering.
///
/// The signature field is empty until the submit step signs the payload
/// digest.
#[derive(Clone, PartialEq, Message)]
pub struct PreparedTransaction {
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub signature: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct EndorseRequest {
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    #[prost(string, tag = "2")]
    pub channel_id: String,
    #[prost(message, optional, tag = "3")]
    pub proposed_transaction: Option<SignedProposal>,
}

#[derive(Clone, PartialEq, Message)]
pub struct EndorseResponse {
    #[prost(message, optional, tag = "1")]
    pub prepared_transaction: Option<PreparedTransaction>,
    /// Chaincode result payload returned to the caller on overall success.
    #[prost(bytes = "vec", tag = "2")]
    pub result: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SubmitRequest {
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    #[prost(string, tag = "2")]
    pub channel_id: String,
    #[prost(message, optional, tag = "3")]
    pub prepared_transaction: Option<PreparedTransaction>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SubmitResponse {}

#[derive(Clone, PartialEq, Message)]
pub struct CommitStatusRequest {
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    #[prost(string, tag = "2")]
    pub channel_id: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct CommitStatusResponse {
    #[prost(enumeration = "TxValidationCode", tag = "1")]
    pub result: i32,
    #[prost(uint64, tag = "2")]
    pub block_number: u64,
}

impl CommitStatusResponse {
    /// Decoded validation code; unrecognized values map to
    /// [`TxValidationCode::InvalidOtherReason`].
    pub fn validation_code(&self) -> TxValidationCode {
        TxValidationCode::try_from(self.result).unwrap_or(TxValidationCode::InvalidOtherReason)
    }
}

/// The ledger's final verdict on a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TxValidationCode {
    Valid = 0,
    NilEnvelope = 1,
    BadPayload = 2,
    BadCommonHeader = 3,
    BadCreatorSignature = 4,
    InvalidEndorserTransaction = 5,
    InvalidConfigTransaction = 6,
    UnsupportedTxPayload = 7,
    BadProposalTxid = 8,
    DuplicateTxid = 9,
    EndorsementPolicyFailure = 10,
    MvccReadConflict = 11,
    PhantomReadConflict = 12,
    UnknownTxType = 13,
    TargetChainNotFound = 14,
    MarshalTxError = 15,
    NilTxaction = 16,
    ExpiredChaincode = 17,
    ChaincodeVersionConflict = 18,
    BadHeaderExtension = 19,
    BadChannelHeader = 20,
    BadResponsePayload = 21,
    BadRwset = 22,
    IllegalWriteset = 23,
    InvalidWriteset = 24,
    InvalidChaincode = 25,
    NotValidated = 254,
    InvalidOtherReason = 255,
}

impl TxValidationCode {
    /// Canonical upper-snake name, as the ledger spells it in block metadata.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            TxValidationCode::Valid => "VALID",
            TxValidationCode::NilEnvelope => "NIL_ENVELOPE",
            TxValidationCode::BadPayload => "BAD_PAYLOAD",
            TxValidationCode::BadCommonHeader => "BAD_COMMON_HEADER",
            TxValidationCode::BadCreatorSignature => "BAD_CREATOR_SIGNATURE",
            TxValidationCode::InvalidEndorserTransaction => "INVALID_ENDORSER_TRANSACTION",
            TxValidationCode::InvalidConfigTransaction => "INVALID_CONFIG_TRANSACTION",
            TxValidationCode::UnsupportedTxPayload => "UNSUPPORTED_TX_PAYLOAD",
            TxValidationCode::BadProposalTxid => "BAD_PROPOSAL_TXID",
            TxValidationCode::DuplicateTxid => "DUPLICATE_TXID",
            TxValidationCode::EndorsementPolicyFailure => "ENDORSEMENT_POLICY_FAILURE",
            TxValidationCode::MvccReadConflict => "MVCC_READ_CONFLICT",
            TxValidationCode::PhantomReadConflict => "PHANTOM_READ_CONFLICT",
            TxValidationCode::UnknownTxType => "UNKNOWN_TX_TYPE",
            TxValidationCode::TargetChainNotFound => "TARGET_CHAIN_NOT_FOUND",
            TxValidationCode::MarshalTxError => "MARSHAL_TX_ERROR",
            TxValidationCode::NilTxaction => "NIL_TXACTION",
            TxValidationCode::ExpiredChaincode => "EXPIRED_CHAINCODE",
            TxValidationCode::ChaincodeVersionConflict => "CHAINCODE_VERSION_CONFLICT",
            TxValidationCode::BadHeaderExtension => "BAD_HEADER_EXTENSION",
            TxValidationCode::BadChannelHeader => "BAD_CHANNEL_HEADER",
            TxValidationCode::BadResponsePayload => "BAD_RESPONSE_PAYLOAD",
            TxValidationCode::BadRwset => "BAD_RWSET",
            TxValidationCode::IllegalWriteset => "ILLEGAL_WRITESET",
            TxValidationCode::InvalidWriteset => "INVALID_WRITESET",
            TxValidationCode::InvalidChaincode => "INVALID_CHAINCODE",
            TxValidationCode::NotValidated => "NOT_VALIDATED",
            TxValidationCode::InvalidOtherReason => "INVALID_OTHER_REASON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_code_round_trips_through_wire_value() {
        let response = CommitStatusResponse {
            result: TxValidationCode::MvccReadConflict as i32,
            block_number: 7,
        };
        assert_eq!(response.validation_code(), TxValidationCode::MvccReadConflict);
        assert_eq!(response.validation_code().as_str_name(), "MVCC_READ_CONFLICT");
    }

    #[test]
    fn unknown_validation_code_maps_to_invalid_other_reason() {
        let response = CommitStatusResponse {
            result: 9999,
            block_number: 0,
        };
        assert_eq!(response.validation_code(), TxValidationCode::InvalidOtherReason);
    }

    #[test]
    fn serialized_identity_decodes_to_same_fields() {
        let identity = SerializedIdentity {
            msp_id: "Org1MSP".to_string(),
            id_bytes: b"-----BEGIN CERTIFICATE-----".to_vec(),
        };
        let decoded = SerializedIdentity::decode(identity.encode_to_vec().as_slice())
            .expect("decode serialized identity");
        assert_eq!(decoded, identity);
    }
}
