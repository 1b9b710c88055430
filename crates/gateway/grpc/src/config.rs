//! Gateway endpoint configuration.

use std::env;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7053";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the gRPC gateway transport.
#[derive(Debug, Clone)]
pub struct GrpcConfig {
    /// Gateway endpoint URL
    endpoint: String,

    /// Time allowed for establishing the connection
    connect_timeout: Duration,

    /// Optional per-RPC deadline; the protocol itself imposes none
    request_timeout: Option<Duration>,
}

impl GrpcConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GATEWAY_ENDPOINT` - Gateway URL (default: http://127.0.0.1:7053)
    /// - `GATEWAY_CONNECT_TIMEOUT_MS` - Connect timeout in milliseconds (default: 5000)
    /// - `GATEWAY_REQUEST_TIMEOUT_MS` - Per-RPC deadline in milliseconds (default: none)
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("GATEWAY_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let connect_timeout = match env::var("GATEWAY_CONNECT_TIMEOUT_MS") {
            Ok(value) => {
                let millis: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid GATEWAY_CONNECT_TIMEOUT_MS: {value}"))?;
                Duration::from_millis(millis)
            }
            Err(_) => DEFAULT_CONNECT_TIMEOUT,
        };

        let request_timeout = match env::var("GATEWAY_REQUEST_TIMEOUT_MS") {
            Ok(value) => {
                let millis: u64 = value
                    .parse()
                    .map_err(|_| format!("Invalid GATEWAY_REQUEST_TIMEOUT_MS: {value}"))?;
                Some(Duration::from_millis(millis))
            }
            Err(_) => None,
        };

        Ok(Self {
            endpoint,
            connect_timeout,
            request_timeout,
        })
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set a per-RPC deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!("Invalid endpoint URL format: {}", self.endpoint));
        }

        if self.connect_timeout.is_zero() {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
