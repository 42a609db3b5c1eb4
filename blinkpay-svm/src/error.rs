//! Error types for Solana action support.

/// A string that is not a base58-encoded 32-byte public key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid public key: {input:?}")]
pub struct InvalidAddress {
    /// The rejected input.
    pub input: String,
}

/// Failure fetching a recent blockhash from the RPC node.
#[derive(Debug, thiserror::Error)]
pub enum BlockhashError {
    /// The RPC client returned an error (transport, HTTP, or JSON-RPC).
    #[error("{0}")]
    Rpc(String),
}

/// Error serializing a transaction for transport.
#[derive(Debug, thiserror::Error)]
#[error("Can not encode transaction to base64: {0}")]
pub struct TransactionEncodeError(pub String);
