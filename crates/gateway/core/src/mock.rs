//! Recording gateway service double for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use prost::Message;

use crate::transport::{GatewayService, TransportError};
use crate::wire::{
    ChaincodeInvocationSpec, ChaincodeProposalPayload, ChaincodeSpec, ChannelHeader,
    CommitStatusRequest, CommitStatusResponse, EndorseRequest, EndorseResponse, Header,
    PreparedTransaction, Proposal, SignatureHeader, SubmitRequest, SubmitResponse,
    TxValidationCode,
};

/// Decode the proposal header from a captured endorse request.
fn proposal_header(request: &EndorseRequest) -> Header {
    let signed = request
        .proposed_transaction
        .as_ref()
        .expect("no signed proposal in endorse request");
    let proposal = Proposal::decode(signed.proposal_bytes.as_slice()).expect("decode proposal");
    Header::decode(proposal.header.as_slice()).expect("decode header")
}

/// Channel header embedded in a captured endorse request's proposal.
pub fn channel_header(request: &EndorseRequest) -> ChannelHeader {
    let header = proposal_header(request);
    ChannelHeader::decode(header.channel_header.as_slice()).expect("decode channel header")
}

/// Signature header embedded in a captured endorse request's proposal.
pub fn signature_header(request: &EndorseRequest) -> SignatureHeader {
    let header = proposal_header(request);
    SignatureHeader::decode(header.signature_header.as_slice()).expect("decode signature header")
}

/// Chaincode spec embedded in a captured endorse request's proposal.
pub fn chaincode_spec(request: &EndorseRequest) -> ChaincodeSpec {
    let signed = request
        .proposed_transaction
        .as_ref()
        .expect("no signed proposal in endorse request");
    let proposal = Proposal::decode(signed.proposal_bytes.as_slice()).expect("decode proposal");
    let payload =
        ChaincodeProposalPayload::decode(proposal.payload.as_slice()).expect("decode payload");
    ChaincodeInvocationSpec::decode(payload.input.as_slice())
        .expect("decode invocation spec")
        .chaincode_spec
        .expect("no chaincode spec in proposal")
}

/// One captured RPC, in arrival order.
#[derive(Debug, Clone)]
pub enum GatewayCall {
    Endorse(EndorseRequest),
    Submit(SubmitRequest),
    CommitStatus(CommitStatusRequest),
}

struct MockState {
    calls: Mutex<Vec<GatewayCall>>,
    result: Vec<u8>,
    validation_code: i32,
    endorse_error: Option<TransportError>,
    submit_error: Option<TransportError>,
    commit_status_error: Option<TransportError>,
}

/// In-memory gateway that records every request and replays configured
/// responses. Endorsement echoes the proposal bytes back as the prepared
/// transaction payload so the submit step has something real to sign.
#[derive(Clone)]
pub struct MockGatewayService {
    state: Arc<MockState>,
}

impl MockGatewayService {
    pub fn new() -> Self {
        Self::with_result(Vec::new())
    }

    pub fn with_result(result: impl Into<Vec<u8>>) -> Self {
        Self {
            state: Arc::new(MockState {
                calls: Mutex::new(Vec::new()),
                result: result.into(),
                validation_code: TxValidationCode::Valid as i32,
                endorse_error: None,
                submit_error: None,
                commit_status_error: None,
            }),
        }
    }

    pub fn validation_code(mut self, code: TxValidationCode) -> Self {
        self.state_mut().validation_code = code as i32;
        self
    }

    /// Replay a raw wire value for the commit verdict, including values
    /// outside the known validation code table.
    pub fn raw_validation_code(mut self, code: i32) -> Self {
        self.state_mut().validation_code = code;
        self
    }

    pub fn fail_endorse(mut self, error: TransportError) -> Self {
        self.state_mut().endorse_error = Some(error);
        self
    }

    pub fn fail_submit(mut self, error: TransportError) -> Self {
        self.state_mut().submit_error = Some(error);
        self
    }

    pub fn fail_commit_status(mut self, error: TransportError) -> Self {
        self.state_mut().commit_status_error = Some(error);
        self
    }

    fn state_mut(&mut self) -> &mut MockState {
        Arc::get_mut(&mut self.state).expect("configure mock before sharing it")
    }

    /// Captured calls in the order the protocol issued them.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.calls.lock().expect("mock lock").clone()
    }

    pub fn captured_endorse(&self) -> EndorseRequest {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                GatewayCall::Endorse(request) => Some(request),
                _ => None,
            })
            .expect("no endorse request captured")
    }

    pub fn captured_submit(&self) -> SubmitRequest {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                GatewayCall::Submit(request) => Some(request),
                _ => None,
            })
            .expect("no submit request captured")
    }

    pub fn captured_commit_status(&self) -> CommitStatusRequest {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                GatewayCall::CommitStatus(request) => Some(request),
                _ => None,
            })
            .expect("no commit status request captured")
    }

    fn record(&self, call: GatewayCall) {
        self.state.calls.lock().expect("mock lock").push(call);
    }
}

impl Default for MockGatewayService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayService for MockGatewayService {
    async fn endorse(&self, request: EndorseRequest) -> Result<EndorseResponse, TransportError> {
        self.record(GatewayCall::Endorse(request.clone()));
        if let Some(error) = &self.state.endorse_error {
            return Err(error.clone());
        }

        let proposal_bytes = request
            .proposed_transaction
            .map(|signed| signed.proposal_bytes)
            .unwrap_or_default();
        Ok(EndorseResponse {
            prepared_transaction: Some(PreparedTransaction {
                transaction_id: request.transaction_id,
                payload: proposal_bytes,
                signature: Vec::new(),
            }),
            result: self.state.result.clone(),
        })
    }

    async fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, TransportError> {
        self.record(GatewayCall::Submit(request));
        if let Some(error) = &self.state.submit_error {
            return Err(error.clone());
        }
        Ok(SubmitResponse {})
    }

    async fn commit_status(
        &self,
        request: CommitStatusRequest,
    ) -> Result<CommitStatusResponse, TransportError> {
        self.record(GatewayCall::CommitStatus(request));
        if let Some(error) = &self.state.commit_status_error {
            return Err(error.clone());
        }
        Ok(CommitStatusResponse {
            result: self.state.validation_code,
            block_number: 1,
        })
    }
}
