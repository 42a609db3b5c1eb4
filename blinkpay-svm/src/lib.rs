#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Solana support for Solana Actions payment endpoints.
//!
//! Builds the unsigned native SOL transfer a payment action hands back to
//! the wallet. The server never signs or broadcasts anything: it only needs
//! a recent blockhash from an RPC node to bind the transaction to the
//! current ledger state.
//!
//! # Modules
//!
//! - [`address`] - Base58 public key parsing and recipient resolution
//! - [`error`] - Error types shared across the crate
//! - [`networks`] - Well-known Solana clusters (RPC URLs, CAIP-2 ids)
//! - [`rpc`] - Recent blockhash lookup behind the [`BlockhashProvider`] trait
//! - [`transfer`] - System Program transfer construction and encoding
//!
//! # Feature Flags
//!
//! - `rpc` (default) - [`rpc::RpcBlockhashProvider`] backed by `solana-client`
//! - `telemetry` - `tracing` events for RPC lookups and transaction building
//!
//! # Example
//!
//! ```ignore
//! use blinkpay_svm::{NativeTransfer, RpcBlockhashProvider, SolanaCluster};
//! use solana_commitment_config::CommitmentConfig;
//!
//! let provider =
//!     RpcBlockhashProvider::new(SolanaCluster::Devnet.rpc_url(), CommitmentConfig::finalized());
//! let recent = provider.latest_blockhash().await?;
//! let tx = NativeTransfer::new(payer, recipient, 7_600_000_000).build_unsigned(&recent);
//! let base64 = tx.as_base64()?;
//! ```

pub mod address;
pub mod error;
pub mod rpc;
pub mod transfer;

mod networks;
pub use networks::*;

pub use address::{parse_address, resolve_recipient};
pub use error::{BlockhashError, InvalidAddress, TransactionEncodeError};
pub use rpc::{BlockhashProvider, RecentBlockhash};
#[cfg(feature = "rpc")]
pub use rpc::RpcBlockhashProvider;
pub use transfer::{NativeTransfer, UnsignedTransfer, sol_to_lamports};

/// Solana public key type used throughout the crate.
pub use solana_pubkey::Pubkey;

/// Blockhash type carried by [`RecentBlockhash`].
pub use solana_message::Hash;
