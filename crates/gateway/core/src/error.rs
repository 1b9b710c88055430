//! Error taxonomy for the submission protocol.

use thiserror::Error;

use crate::crypto::SigningError;
use crate::transport::TransportError;
use crate::wire::TxValidationCode;

/// Errors surfaced by `submit_transaction` and the gateway builder.
///
/// No failure is swallowed or retried internally: the first error aborts the
/// endorse → submit → commit-status sequence at the point of occurrence.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connectivity failure at any RPC step, propagated unchanged from the
    /// transport.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Endorse and submit succeeded but the ledger rejected the transaction.
    /// The only error the protocol constructs itself.
    #[error("transaction {transaction_id} failed to commit with status {}", .code.as_str_name())]
    Commit {
        transaction_id: String,
        code: TxValidationCode,
    },

    /// The signer could not produce a signature.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The gateway handle was assembled from invalid parts.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Validation code for a commit rejection, if that is what this error is.
    pub fn validation_code(&self) -> Option<TxValidationCode> {
        match self {
            GatewayError::Commit { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_error_message_names_the_validation_code() {
        let err = GatewayError::Commit {
            transaction_id: "abc123".to_string(),
            code: TxValidationCode::MvccReadConflict,
        };
        let message = err.to_string();
        assert!(message.contains("MVCC_READ_CONFLICT"), "{message}");
        assert!(message.contains("abc123"), "{message}");
        assert_eq!(
            err.validation_code(),
            Some(TxValidationCode::MvccReadConflict)
        );
    }
}
