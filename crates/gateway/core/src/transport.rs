//! Trait boundary for the three remote gateway operations.
//!
//! The protocol issues at most three sequential unary calls per submission
//! and adds no retry, deadline, or recovery semantics of its own: whatever
//! status the transport produces is propagated unchanged to the caller.

use async_trait::async_trait;
use thiserror::Error;

use crate::wire::{
    CommitStatusRequest, CommitStatusResponse, EndorseRequest, EndorseResponse, SubmitRequest,
    SubmitResponse,
};

/// RPC failure category, mirroring the gRPC status code set so the original
/// cause survives the trait boundary losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

/// A connectivity or availability failure raised by the transport.
///
/// Never constructed by the protocol itself; it carries through whatever the
/// underlying channel reported so callers can distinguish transient causes
/// (unavailable, deadline exceeded) from permanent ones.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct TransportError {
    pub code: StatusCode,
    pub message: String,
}

impl TransportError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The gateway's endorse/submit/commit-status surface.
///
/// Implementations own channel multiplexing and per-call cancellation; they
/// must be safe for concurrent use from multiple in-flight submissions.
#[async_trait]
pub trait GatewayService: Send + Sync {
    /// Ask the gateway to endorse a signed proposal, returning the prepared
    /// transaction envelope and the chaincode result payload.
    async fn endorse(&self, request: EndorseRequest) -> Result<EndorseResponse, TransportError>;

    /// Forward a signed prepared transaction for ordering. Returns once the
    /// gateway accepts it, not once it commits.
    async fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, TransportError>;

    /// Fetch the final validation verdict for a transaction id.
    async fn commit_status(
        &self,
        request: CommitStatusRequest,
    ) -> Result<CommitStatusResponse, TransportError>;
}
