//! tonic-backed implementation of the gateway service.

use async_trait::async_trait;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

use gateway_core::wire::{
    CommitStatusRequest, CommitStatusResponse, EndorseRequest, EndorseResponse, SubmitRequest,
    SubmitResponse,
};
use gateway_core::{GatewayService, StatusCode, TransportError};

use crate::config::GrpcConfig;

const ENDORSE_PATH: &str = "/gateway.Gateway/Endorse";
const SUBMIT_PATH: &str = "/gateway.Gateway/Submit";
const COMMIT_STATUS_PATH: &str = "/gateway.Gateway/CommitStatus";

/// gRPC connection to a gateway.
///
/// The channel multiplexes concurrent RPCs; cloning per call is cheap.
#[derive(Debug, Clone)]
pub struct GrpcGateway {
    client: RawGatewayClient,
}

impl GrpcGateway {
    /// Build a lazily connected client from validated configuration.
    ///
    /// Connection establishment is deferred to the first RPC; connectivity
    /// problems surface as transport errors from the failing call. Must be
    /// called from within a Tokio runtime, which the lazy channel uses to
    /// drive its connection.
    pub fn connect(config: &GrpcConfig) -> Result<Self, TransportError> {
        config
            .validate()
            .map_err(|reason| TransportError::new(StatusCode::InvalidArgument, reason))?;

        let mut endpoint = Endpoint::from_shared(config.endpoint().to_string())
            .map_err(|e| TransportError::new(StatusCode::InvalidArgument, e.to_string()))?
            .connect_timeout(config.connect_timeout());
        if let Some(timeout) = config.request_timeout() {
            endpoint = endpoint.timeout(timeout);
        }

        let channel = endpoint.connect_lazy();
        tracing::debug!(endpoint = config.endpoint(), "gateway channel created");
        Ok(Self {
            client: RawGatewayClient::new(channel),
        })
    }
}

#[async_trait]
impl GatewayService for GrpcGateway {
    async fn endorse(&self, request: EndorseRequest) -> Result<EndorseResponse, TransportError> {
        let mut client = self.client.clone();
        client
            .unary(request, ENDORSE_PATH)
            .await
            .map_err(into_transport_error)
    }

    async fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, TransportError> {
        let mut client = self.client.clone();
        client
            .unary(request, SUBMIT_PATH)
            .await
            .map_err(into_transport_error)
    }

    async fn commit_status(
        &self,
        request: CommitStatusRequest,
    ) -> Result<CommitStatusResponse, TransportError> {
        let mut client = self.client.clone();
        client
            .unary(request, COMMIT_STATUS_PATH)
            .await
            .map_err(into_transport_error)
    }
}

/// Thin unary client over `tonic::client::Grpc`, written by hand so the
/// crate builds without a protoc toolchain.
#[derive(Debug, Clone)]
struct RawGatewayClient {
    inner: tonic::client::Grpc<Channel>,
}

impl RawGatewayClient {
    fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Req,
        path: &'static str,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("service was not ready: {e}")))?;
        let codec: tonic::codec::ProstCodec<Req, Resp> = tonic::codec::ProstCodec::default();
        let path = PathAndQuery::from_static(path);
        self.inner
            .unary(tonic::Request::new(request), path, codec)
            .await
            .map(tonic::Response::into_inner)
    }
}

/// Lossless mapping from a tonic status into the transport error carried
/// across the service trait boundary.
fn into_transport_error(status: tonic::Status) -> TransportError {
    TransportError::new(map_code(status.code()), status.message())
}

fn map_code(code: tonic::Code) -> StatusCode {
    match code {
        tonic::Code::Cancelled => StatusCode::Cancelled,
        tonic::Code::InvalidArgument => StatusCode::InvalidArgument,
        tonic::Code::DeadlineExceeded => StatusCode::DeadlineExceeded,
        tonic::Code::NotFound => StatusCode::NotFound,
        tonic::Code::AlreadyExists => StatusCode::AlreadyExists,
        tonic::Code::PermissionDenied => StatusCode::PermissionDenied,
        tonic::Code::ResourceExhausted => StatusCode::ResourceExhausted,
        tonic::Code::FailedPrecondition => StatusCode::FailedPrecondition,
        tonic::Code::Aborted => StatusCode::Aborted,
        tonic::Code::OutOfRange => StatusCode::OutOfRange,
        tonic::Code::Unimplemented => StatusCode::Unimplemented,
        tonic::Code::Internal => StatusCode::Internal,
        tonic::Code::Unavailable => StatusCode::Unavailable,
        tonic::Code::DataLoss => StatusCode::DataLoss,
        tonic::Code::Unauthenticated => StatusCode::Unauthenticated,
        // A failed RPC never carries Ok; treat anything else as unknown.
        tonic::Code::Ok | tonic::Code::Unknown => StatusCode::Unknown,
    }
}
