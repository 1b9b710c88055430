//! Gateway / Network / Contract facade and the submission pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::crypto::{HashFunction, Sha256Hash, Signer, UndefinedSigner};
use crate::error::GatewayError;
use crate::identity::Identity;
use crate::proposal::{ProposalBuilder, UnsignedProposal};
use crate::transport::GatewayService;
use crate::wire::{
    CommitStatusRequest, EndorseRequest, PreparedTransaction, SignedProposal, SubmitRequest,
    TxValidationCode,
};

/// Shared, read-only state behind every handle derived from one gateway.
struct GatewayInner {
    identity: Identity,
    creator: Vec<u8>,
    signer: Arc<dyn Signer>,
    hash: Arc<dyn HashFunction>,
    service: Arc<dyn GatewayService>,
}

/// Client handle to a gateway service.
///
/// Cheap to clone through [`Network`] and [`Contract`] handles; all of them
/// share the identity, signer, hash, and connection. Dropping the last
/// handle releases the underlying connection.
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("identity", &self.inner.identity)
            .finish_non_exhaustive()
    }
}

impl Gateway {
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    pub fn identity(&self) -> &Identity {
        &self.inner.identity
    }

    /// Handle to a named network (ledger channel).
    pub fn network(&self, name: impl Into<String>) -> Network {
        Network {
            inner: Arc::clone(&self.inner),
            name: name.into(),
        }
    }
}

/// Assembles a [`Gateway`] from its collaborators.
///
/// The identity and connection are required; the signer defaults to a
/// fail-on-use placeholder and the hash to SHA-256.
#[derive(Default)]
pub struct GatewayBuilder {
    identity: Option<Identity>,
    signer: Option<Arc<dyn Signer>>,
    hash: Option<Arc<dyn HashFunction>>,
    connection: Option<Arc<dyn GatewayService>>,
}

impl GatewayBuilder {
    pub fn identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn signer(mut self, signer: impl Signer + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    pub fn hash(mut self, hash: impl HashFunction + 'static) -> Self {
        self.hash = Some(Arc::new(hash));
        self
    }

    /// Transport implementation of the gateway service.
    pub fn connection(mut self, service: impl GatewayService + 'static) -> Self {
        self.connection = Some(Arc::new(service));
        self
    }

    pub fn connect(self) -> Result<Gateway, GatewayError> {
        let identity = self
            .identity
            .ok_or_else(|| GatewayError::Config("an identity is required".to_string()))?;
        if identity.msp_id().is_empty() {
            return Err(GatewayError::Config(
                "identity MSP id must not be empty".to_string(),
            ));
        }
        let service = self
            .connection
            .ok_or_else(|| GatewayError::Config("a gateway connection is required".to_string()))?;

        let creator = identity.serialize();
        Ok(Gateway {
            inner: Arc::new(GatewayInner {
                identity,
                creator,
                signer: self.signer.unwrap_or_else(|| Arc::new(UndefinedSigner)),
                hash: self.hash.unwrap_or_else(|| Arc::new(Sha256Hash)),
                service,
            }),
        })
    }
}

/// A named network reached through the gateway.
pub struct Network {
    inner: Arc<GatewayInner>,
    name: String,
}

impl Network {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to the default contract of a chaincode.
    pub fn contract(&self, chaincode_id: impl Into<String>) -> Contract {
        Contract {
            inner: Arc::clone(&self.inner),
            channel: self.name.clone(),
            chaincode_id: chaincode_id.into(),
            contract_name: None,
        }
    }

    /// Handle to a named contract within a chaincode. Transaction names are
    /// qualified as `"<contract>:<name>"` on the wire.
    pub fn contract_with_name(
        &self,
        chaincode_id: impl Into<String>,
        contract_name: impl Into<String>,
    ) -> Contract {
        Contract {
            inner: Arc::clone(&self.inner),
            channel: self.name.clone(),
            chaincode_id: chaincode_id.into(),
            contract_name: Some(contract_name.into()),
        }
    }
}

/// A chaincode contract on one network.
pub struct Contract {
    inner: Arc<GatewayInner>,
    channel: String,
    chaincode_id: String,
    contract_name: Option<String>,
}

impl Contract {
    pub fn chaincode_id(&self) -> &str {
        &self.chaincode_id
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    /// Submit a transaction and wait for it to commit.
    ///
    /// Runs the full pipeline: build the proposal, endorse it, submit the
    /// prepared transaction for ordering, and wait for the validation
    /// verdict. Arguments may be text or raw bytes; either way they reach
    /// the chaincode byte-for-byte. Returns the chaincode result payload
    /// from the endorsement response.
    ///
    /// Any step's failure aborts the sequence at the point of occurrence;
    /// nothing is retried.
    pub async fn submit_transaction<A>(
        &self,
        transaction_name: &str,
        arguments: impl IntoIterator<Item = A>,
    ) -> Result<Vec<u8>, GatewayError>
    where
        A: Into<Vec<u8>>,
    {
        let arguments: Vec<Vec<u8>> = arguments.into_iter().map(Into::into).collect();
        let proposal = ProposalBuilder::new(
            self.channel.clone(),
            self.chaincode_id.clone(),
            self.inner.creator.clone(),
        )
        .contract_name(self.contract_name.clone())
        .transaction_name(transaction_name)
        .arguments(arguments)
        .build();

        let transaction_id = proposal.transaction_id.clone();
        let (prepared, result) = self.inner.endorse(proposal).await?;
        self.inner
            .submit(&self.channel, &transaction_id, prepared)
            .await?;
        self.inner
            .wait_for_commit(&self.channel, &transaction_id)
            .await?;
        Ok(result)
    }
}

impl GatewayInner {
    /// Sign the proposal digest and ask the gateway for an endorsement.
    async fn endorse(
        &self,
        proposal: UnsignedProposal,
    ) -> Result<(PreparedTransaction, Vec<u8>), GatewayError> {
        let digest = self.hash.digest(&proposal.proposal_bytes);
        let signature = self.signer.sign(&digest)?;

        debug!(
            transaction_id = %proposal.transaction_id,
            channel = %proposal.channel_id,
            "endorsing proposal"
        );
        let response = self
            .service
            .endorse(EndorseRequest {
                transaction_id: proposal.transaction_id,
                channel_id: proposal.channel_id,
                proposed_transaction: Some(SignedProposal {
                    proposal_bytes: proposal.proposal_bytes,
                    signature,
                }),
            })
            .await?;

        let prepared = response.prepared_transaction.unwrap_or_default();
        Ok((prepared, response.result))
    }

    /// Sign the prepared transaction digest and hand it over for ordering.
    async fn submit(
        &self,
        channel: &str,
        transaction_id: &str,
        mut prepared: PreparedTransaction,
    ) -> Result<(), GatewayError> {
        let digest = self.hash.digest(&prepared.payload);
        prepared.signature = self.signer.sign(&digest)?;

        debug!(transaction_id, channel, "submitting prepared transaction");
        self.service
            .submit(SubmitRequest {
                transaction_id: transaction_id.to_string(),
                channel_id: channel.to_string(),
                prepared_transaction: Some(prepared),
            })
            .await?;
        Ok(())
    }

    /// Fetch the final validation verdict for the transaction.
    async fn wait_for_commit(
        &self,
        channel: &str,
        transaction_id: &str,
    ) -> Result<(), GatewayError> {
        let status = self
            .service
            .commit_status(CommitStatusRequest {
                transaction_id: transaction_id.to_string(),
                channel_id: channel.to_string(),
            })
            .await?;

        match status.validation_code() {
            TxValidationCode::Valid => {
                debug!(
                    transaction_id,
                    block_number = status.block_number,
                    "transaction committed"
                );
                Ok(())
            }
            code => {
                warn!(
                    transaction_id,
                    code = code.as_str_name(),
                    "transaction failed validation"
                );
                Err(GatewayError::Commit {
                    transaction_id: transaction_id.to_string(),
                    code,
                })
            }
        }
    }
}
