//! Well-known Solana clusters.
//!
//! Clusters are identified on the wire by their CAIP-2 id, `solana:` followed
//! by the first 32 characters of the genesis hash.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Static metadata for a Solana cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterInfo {
    /// Cluster name as used by Solana tooling.
    pub name: &'static str,
    /// Truncated genesis hash (CAIP-2 reference).
    pub reference: &'static str,
    /// Public RPC endpoint operated by Solana Labs.
    pub rpc_url: &'static str,
}

/// Well-known Solana clusters, indexed by [`SolanaCluster`] discriminant.
pub static SOLANA_CLUSTERS: &[ClusterInfo] = &[
    ClusterInfo {
        name: "mainnet-beta",
        reference: "5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
        rpc_url: "https://api.mainnet-beta.solana.com",
    },
    ClusterInfo {
        name: "devnet",
        reference: "EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
        rpc_url: "https://api.devnet.solana.com",
    },
    ClusterInfo {
        name: "testnet",
        reference: "4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z",
        rpc_url: "https://api.testnet.solana.com",
    },
];

/// CAIP-2 namespace for Solana chains.
pub const SOLANA_NAMESPACE: &str = "solana";

/// A Solana cluster the action builds transactions for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolanaCluster {
    /// Production cluster.
    MainnetBeta = 0,
    /// Development cluster with free airdrops.
    #[default]
    Devnet = 1,
    /// Validator testing cluster.
    Testnet = 2,
}

impl SolanaCluster {
    /// All known clusters.
    pub const ALL: [Self; 3] = [Self::MainnetBeta, Self::Devnet, Self::Testnet];

    /// Static metadata for this cluster.
    #[must_use]
    pub fn info(self) -> &'static ClusterInfo {
        &SOLANA_CLUSTERS[self as usize]
    }

    /// Default public RPC URL.
    #[must_use]
    pub fn rpc_url(self) -> &'static str {
        self.info().rpc_url
    }

    /// CAIP-2 chain id, e.g. `solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1`.
    #[must_use]
    pub fn caip2(self) -> String {
        format!("{SOLANA_NAMESPACE}:{}", self.info().reference)
    }
}

impl Display for SolanaCluster {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

/// Error returned for an unrecognized cluster name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown Solana cluster: {0}")]
pub struct UnknownCluster(pub String);

impl FromStr for SolanaCluster {
    type Err = UnknownCluster;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name {
            "mainnet" => Ok(Self::MainnetBeta),
            _ => Self::ALL
                .into_iter()
                .find(|c| c.info().name == name)
                .ok_or_else(|| UnknownCluster(name.to_owned())),
        }
    }
}
