//! Recent blockhash lookup.
//!
//! [`BlockhashProvider`] is the only seam between request handling and the
//! network. Handlers hold it behind an `Arc` so tests can substitute a fixed
//! blockhash without an RPC node.

use std::sync::Arc;

use async_trait::async_trait;
use solana_message::Hash;

use crate::error::BlockhashError;

/// A blockhash together with the last block height at which a transaction
/// referencing it is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentBlockhash {
    /// Recent blockhash to bind the transaction to.
    pub blockhash: Hash,
    /// Block height after which the transaction expires.
    pub last_valid_block_height: u64,
}

/// Source of recent blockhashes.
#[async_trait]
pub trait BlockhashProvider: Send + Sync {
    /// Fetches the latest blockhash.
    ///
    /// # Errors
    ///
    /// Returns [`BlockhashError`] if the lookup fails.
    async fn latest_blockhash(&self) -> Result<RecentBlockhash, BlockhashError>;
}

#[async_trait]
impl<T: BlockhashProvider + ?Sized> BlockhashProvider for Arc<T> {
    async fn latest_blockhash(&self) -> Result<RecentBlockhash, BlockhashError> {
        (**self).latest_blockhash().await
    }
}

#[cfg(feature = "rpc")]
pub use self::client::RpcBlockhashProvider;

#[cfg(feature = "rpc")]
mod client {
    use std::fmt;
    use std::time::Duration;

    use async_trait::async_trait;
    use solana_client::nonblocking::rpc_client::RpcClient;
    use solana_commitment_config::CommitmentConfig;

    use super::{BlockhashProvider, RecentBlockhash};
    use crate::error::BlockhashError;

    /// [`BlockhashProvider`] backed by a JSON-RPC node.
    ///
    /// The underlying client keeps a pooled HTTP connection and no other
    /// state, so one instance is shared by every request.
    pub struct RpcBlockhashProvider {
        client: RpcClient,
    }

    impl fmt::Debug for RpcBlockhashProvider {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("RpcBlockhashProvider")
                .field("url", &self.client.url())
                .field("commitment", &self.client.commitment().commitment)
                .finish()
        }
    }

    impl RpcBlockhashProvider {
        /// Connects to `rpc_url` with the client's default request timeout.
        #[must_use]
        pub fn new(rpc_url: impl Into<String>, commitment: CommitmentConfig) -> Self {
            Self {
                client: RpcClient::new_with_commitment(rpc_url.into(), commitment),
            }
        }

        /// Connects to `rpc_url`, failing requests that take longer than
        /// `timeout`.
        #[must_use]
        pub fn with_timeout(
            rpc_url: impl Into<String>,
            timeout: Duration,
            commitment: CommitmentConfig,
        ) -> Self {
            Self {
                client: RpcClient::new_with_timeout_and_commitment(
                    rpc_url.into(),
                    timeout,
                    commitment,
                ),
            }
        }

        /// The RPC endpoint URL.
        #[must_use]
        pub fn url(&self) -> String {
            self.client.url()
        }
    }

    #[async_trait]
    impl BlockhashProvider for RpcBlockhashProvider {
        async fn latest_blockhash(&self) -> Result<RecentBlockhash, BlockhashError> {
            let (blockhash, last_valid_block_height) = self
                .client
                .get_latest_blockhash_with_commitment(self.client.commitment())
                .await
                .map_err(|e| BlockhashError::Rpc(e.to_string()))?;
            #[cfg(feature = "telemetry")]
            tracing::debug!(
                %blockhash,
                last_valid_block_height,
                "Fetched latest blockhash"
            );
            Ok(RecentBlockhash {
                blockhash,
                last_valid_block_height,
            })
        }
    }
}
