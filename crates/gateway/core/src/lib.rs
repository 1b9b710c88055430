//! Client-side submission protocol for a ledger gateway.
//!
//! This crate turns a named chaincode invocation into a signed, ordered,
//! committed ledger transaction by driving three unary calls against a
//! gateway service:
//!
//! ```text
//! build proposal → Endorse → Submit → CommitStatus
//! ```
//!
//! # Architecture
//!
//! - **Capabilities**: [`Identity`], [`Signer`], and [`HashFunction`] supply
//!   the creator encoding, signature, and digest for every request. They are
//!   small single-method contracts so tests and alternate cryptographic
//!   backends can swap them freely.
//! - **Wire layer**: [`wire`] holds the protobuf messages exchanged with the
//!   gateway; [`proposal`] builds the canonical proposal bytes and the
//!   transaction id carried through the whole lifecycle.
//! - **Transport seam**: [`GatewayService`] is the trait boundary for the
//!   three remote operations. The gRPC implementation lives in the
//!   `gateway-grpc` crate.
//! - **Facade**: [`Gateway`] → [`Network`] → [`Contract`] carry the
//!   configuration and expose `submit_transaction`.
//!
//! # Usage
//!
//! ```ignore
//! use gateway_core::{Gateway, Identity};
//!
//! let gateway = Gateway::builder()
//!     .identity(Identity::new("Org1MSP", certificate_pem))
//!     .signer(my_signer)
//!     .connection(grpc_service)
//!     .connect()?;
//!
//! let network = gateway.network("mychannel");
//! let contract = network.contract("basic");
//! let result = contract.submit_transaction("createAsset", ["asset1", "blue"]).await?;
//! ```

pub mod client;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod proposal;
pub mod transport;
pub mod wire;

#[cfg(test)]
pub mod mock;

pub use client::{Contract, Gateway, GatewayBuilder, Network};
pub use crypto::{HashFunction, Sha256Hash, Signer, SigningError};
pub use error::GatewayError;
pub use identity::Identity;
pub use transport::{GatewayService, StatusCode, TransportError};
pub use wire::TxValidationCode;
