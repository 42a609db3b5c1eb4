//! Server configuration.
//!
//! Loads configuration from a TOML file with support for environment variable
//! expansion in string values. Variables use `$VAR` or `${VAR}` syntax. A
//! missing file is not an error: every key has a default.
//!
//! # Example Configuration
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3000
//! cluster = "devnet"
//! rpc_url = "$HELIUS_DEVNET_URL"
//! commitment = "confirmed"
//! rpc_timeout_secs = 10
//! public_url = "https://pay.example.com"
//! default_recipient = "4Muim1sZ4sa2DUNAzku68SW798wF1aTiVeHZiCrs4pZz"
//!
//! [campaign]
//! title = "Workshop ticket"
//! amount = "0.5"
//! link_label = "0.5 SOL"
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG` - Path to configuration file (default: `config.toml`)
//! - `HOST`, `PORT` - Override the bind address
//! - `CLUSTER` - Override the Solana cluster
//! - `RPC_URL` - Override the RPC endpoint
//! - `PUBLIC_URL` - Override the public origin used in links
//! - `DEFAULT_RECIPIENT` - Override the default payment recipient

use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use blinkpay::{AmountError, CoinAmount};
use blinkpay_svm::{
    InvalidAddress, Pubkey, RpcBlockhashProvider, SolanaCluster, parse_address, sol_to_lamports,
};
use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;
use url::Url;

/// Recipient used when neither the config file nor `?to=` names one.
pub const DEFAULT_RECIPIENT: &str = "4Muim1sZ4sa2DUNAzku68SW798wF1aTiVeHZiCrs4pZz";

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (default: `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Server port (default: `3000`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Cluster the transactions target (default: devnet).
    #[serde(default)]
    pub cluster: SolanaCluster,

    /// JSON-RPC endpoint. Falls back to the cluster's public endpoint.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Commitment used when fetching the latest blockhash.
    #[serde(default)]
    pub commitment: Commitment,

    /// Per-request RPC timeout in seconds. Unset keeps the client default.
    #[serde(default)]
    pub rpc_timeout_secs: Option<u64>,

    /// Public origin for icon and link URLs. Unset derives it from the
    /// request's `Host` headers.
    #[serde(default)]
    pub public_url: Option<Url>,

    /// Base58 recipient used when `?to=` is absent.
    #[serde(default = "default_recipient")]
    pub default_recipient: String,

    /// What the action shows and charges.
    #[serde(default)]
    pub campaign: PaymentCampaign,
}

/// Blockhash commitment level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Processed by the connected node.
    Processed,
    /// Voted on by a supermajority.
    Confirmed,
    /// Rooted; cannot be rolled back.
    #[default]
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => Self::processed(),
            Commitment::Confirmed => Self::confirmed(),
            Commitment::Finalized => Self::finalized(),
        }
    }
}

/// Display copy and pricing for the payment action.
///
/// Defaults describe the Super30 cohort enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentCampaign {
    /// Action title.
    pub title: String,
    /// Icon path or absolute URL, resolved against the request origin.
    pub icon: String,
    /// Multi-line description.
    pub description: String,
    /// Default button label.
    pub label: String,
    /// Label of the pre-set amount link.
    pub link_label: String,
    /// Pre-set amount in SOL.
    pub amount: CoinAmount,
    /// Message returned with the transaction.
    pub message: String,
}

impl Default for PaymentCampaign {
    fn default() -> Self {
        Self {
            title: "100xdevs Super30".to_owned(),
            icon: "/logo.png".to_owned(),
            description: concat!(
                "Starts 10th October\n",
                "You can join online, but preferably come on-site.\n",
                "Basic web development is a pre-requisite. Basics of React/Node.js should be known before joining.\n",
                "3 months, intense on-site, build a lot of projects and productionising them.\n",
                "On-site location - Sector 62 noida, 300m from the metro station. PG available 1km from the campus for Rs 10k/mo with food.\n\n",
                "✨ Important: After making the payment, please send an email to 100xdevs@gmail.com with your transaction signature. We will use that email to grant you access to the course. 📧",
            )
            .to_owned(),
            label: "Pay".to_owned(),
            link_label: "7.6SOL(1181.80$)".to_owned(),
            amount: CoinAmount::try_new(76, 1).expect("7.6 is a valid amount"),
            message: "please send an email to 100xdevs@gmail.com with the transaction signature. We’ll let you in the course with that email.".to_owned(),
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`ServerConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    Env {
        /// Variable name.
        var: &'static str,
        /// Parse failure.
        reason: String,
    },
    /// The default recipient is not a public key.
    #[error("invalid default_recipient: {0}")]
    Recipient(#[from] InvalidAddress),
    /// The campaign amount cannot be expressed in lamports.
    #[error("invalid campaign amount: {0}")]
    Amount(#[source] AmountError),
    /// The RPC endpoint is not a URL.
    #[error("invalid rpc_url {url:?}: {source}")]
    RpcUrl {
        /// Configured endpoint.
        url: String,
        /// URL parse failure.
        source: url::ParseError,
    },
    /// The campaign icon cannot form a URL.
    #[error("invalid campaign icon {icon:?}: {source}")]
    Icon {
        /// Configured icon.
        icon: String,
        /// URL join failure.
        source: url::ParseError,
    },
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
}

const fn default_port() -> u16 {
    3000
}

fn default_recipient() -> String {
    DEFAULT_RECIPIENT.to_owned()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cluster: SolanaCluster::default(),
            rpc_url: None,
            commitment: Commitment::default(),
            rpc_timeout_secs: None,
            public_url: None,
            default_recipient: default_recipient(),
            campaign: PaymentCampaign::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the path given by the `CONFIG` environment
    /// variable, falling back to `config.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG").unwrap_or_else(|_| "config.toml".to_owned());
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file path, applying environment
    /// variable expansion and overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or a
    /// value fails validation.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let content = if Path::new(path).exists() {
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_owned(),
                source,
            })?
        } else {
            String::new()
        };
        Self::from_toml(&content, |name| std::env::var(name).ok())
    }

    /// Parses TOML `content`, resolving `$VAR` references and overrides with
    /// `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml<F>(content: &str, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let expanded = expand_env_vars(content, &env);
        let mut config: Self = toml::from_str(&expanded)?;

        // HOST / PORT keep the file value when unparsable
        if let Some(addr) = env("HOST").and_then(|h| h.parse().ok()) {
            config.host = addr;
        }
        if let Some(port) = env("PORT").and_then(|p| p.parse().ok()) {
            config.port = port;
        }
        if let Some(cluster) = env("CLUSTER") {
            config.cluster = cluster.parse().map_err(|e| ConfigError::Env {
                var: "CLUSTER",
                reason: format!("{e}"),
            })?;
        }
        if let Some(rpc_url) = env("RPC_URL").filter(|u| !u.is_empty()) {
            config.rpc_url = Some(rpc_url);
        }
        if let Some(public_url) = env("PUBLIC_URL").filter(|u| !u.is_empty()) {
            config.public_url = Some(public_url.parse().map_err(|e| ConfigError::Env {
                var: "PUBLIC_URL",
                reason: format!("{e}"),
            })?);
        }
        if let Some(recipient) = env("DEFAULT_RECIPIENT").filter(|r| !r.is_empty()) {
            config.default_recipient = recipient;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.recipient()?;
        sol_to_lamports(&self.campaign.amount).map_err(ConfigError::Amount)?;
        Url::parse(self.effective_rpc_url()).map_err(|source| ConfigError::RpcUrl {
            url: self.effective_rpc_url().to_owned(),
            source,
        })?;
        Url::parse("http://localhost/")
            .and_then(|probe| probe.join(&self.campaign.icon))
            .map_err(|source| ConfigError::Icon {
                icon: self.campaign.icon.clone(),
                source,
            })?;
        Ok(())
    }

    /// The parsed default recipient.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAddress`] if `default_recipient` is not a public key.
    pub fn recipient(&self) -> Result<Pubkey, InvalidAddress> {
        parse_address(&self.default_recipient)
    }

    /// The RPC endpoint in effect.
    #[must_use]
    pub fn effective_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.cluster.rpc_url())
    }

    /// Builds the blockhash provider for the configured endpoint.
    #[must_use]
    pub fn blockhash_provider(&self) -> RpcBlockhashProvider {
        let url = self.effective_rpc_url();
        let commitment = CommitmentConfig::from(self.commitment);
        match self.rpc_timeout_secs {
            Some(secs) => {
                RpcBlockhashProvider::with_timeout(url, Duration::from_secs(secs), commitment)
            }
            None => RpcBlockhashProvider::new(url, commitment),
        }
    }
}

/// Expands `$VAR` and `${VAR}` patterns in a string using `env`.
///
/// Unresolved variables are left as-is.
fn expand_env_vars<F>(input: &str, env: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        let mut closed = false;
        while let Some(&c) = chars.peek() {
            if braced && c == '}' {
                chars.next();
                closed = true;
                break;
            }
            if !braced && !c.is_ascii_alphanumeric() && c != '_' {
                break;
            }
            var_name.push(c);
            chars.next();
        }

        let complete = !var_name.is_empty() && (closed || !braced);
        match env(&var_name).filter(|_| complete) {
            Some(value) => result.push_str(&value),
            None => {
                result.push('$');
                if braced {
                    result.push('{');
                }
                result.push_str(&var_name);
                if closed {
                    result.push('}');
                }
            }
        }
    }

    result
}
