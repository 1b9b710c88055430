//! gRPC transport for the gateway submission protocol.
//!
//! Implements `gateway_core::GatewayService` over a tonic channel. The
//! connection is established lazily so a handle can be built before the
//! gateway is listening; connectivity errors surface on the first RPC and
//! are mapped losslessly into `TransportError`.
//!
//! # Usage
//!
//! ```ignore
//! use gateway_grpc::{GrpcConfig, GrpcGateway};
//!
//! let config = GrpcConfig::from_env()?;
//! let connection = GrpcGateway::connect(&config)?;
//! let gateway = Gateway::builder()
//!     .identity(identity)
//!     .signer(signer)
//!     .connection(connection)
//!     .connect()?;
//! ```

pub mod client;
pub mod config;

pub use client::GrpcGateway;
pub use config::GrpcConfig;
