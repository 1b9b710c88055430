//! Submit one transaction from the command line.
//!
//! ```bash
//! GATEWAY_ENDPOINT=http://127.0.0.1:7053 \
//! GATEWAY_MSP_ID=Org1MSP \
//! GATEWAY_CERT_PATH=./creds/cert.pem \
//! cargo run -p gateway-grpc --bin gateway-submit -- mychannel basic createAsset asset1 blue
//! ```

use anyhow::{Context, Result};

use gateway_core::{Gateway, Identity, Signer, SigningError};
use gateway_grpc::{GrpcConfig, GrpcGateway};

/// Development signer for gateways that do not verify client signatures:
/// the digest itself stands in for the signature. Production networks need
/// a key-backed signer instead.
struct PassthroughSigner;

impl Signer for PassthroughSigner {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        Ok(digest.to_vec())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let usage = "usage: gateway-submit <channel> <chaincode> <transaction> [args...]";
    let channel = args.next().context(usage)?;
    let chaincode = args.next().context(usage)?;
    let transaction = args.next().context(usage)?;
    let arguments: Vec<String> = args.collect();

    let msp_id = std::env::var("GATEWAY_MSP_ID").unwrap_or_else(|_| "Org1MSP".to_string());
    let cert_path = std::env::var("GATEWAY_CERT_PATH")
        .context("GATEWAY_CERT_PATH must point to a certificate file")?;
    let credentials =
        std::fs::read(&cert_path).with_context(|| format!("reading certificate {cert_path}"))?;

    let config = GrpcConfig::from_env().map_err(anyhow::Error::msg)?;
    tracing::info!(endpoint = config.endpoint(), "connecting to gateway");
    let connection = GrpcGateway::connect(&config)?;

    let gateway = Gateway::builder()
        .identity(Identity::new(msp_id, credentials))
        .signer(PassthroughSigner)
        .connection(connection)
        .connect()?;

    let contract = gateway.network(&channel).contract(&chaincode);
    tracing::info!(%channel, %chaincode, %transaction, "submitting transaction");
    let result = contract.submit_transaction(&transaction, arguments).await?;

    println!("{}", String::from_utf8_lossy(&result));
    Ok(())
}
