//! Error types for the payment action endpoints.
//!
//! Every failure is scoped to one request and becomes a `400 Bad Request`
//! with a plain-text message. The variant's [`ActionError::kind`] is logged
//! and echoed in the `X-Action-Error-Kind` header so clients can branch on
//! it without parsing the message.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use blinkpay::AmountError;
use blinkpay::headers::X_ACTION_ERROR_KIND;
use blinkpay_svm::{BlockhashError, TransactionEncodeError};

/// Message used when an upstream failure carries no text of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Errors that can occur while serving a payment action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// `to` is present but not a public key.
    #[error("Invalid input query parameter: to")]
    InvalidRecipient,

    /// `amount` is missing or unusable.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// The POST body is not JSON.
    #[error("Invalid request body")]
    InvalidBody,

    /// `account` is missing or not a public key.
    #[error("Invalid \"account\" provided")]
    InvalidAccount,

    /// Icon or link URLs could not be built from the request origin.
    #[error("Invalid request origin: {0}")]
    InvalidOrigin(String),

    /// The RPC node could not supply a recent blockhash.
    #[error("{0}")]
    Upstream(String),

    /// The transaction could not be serialized.
    #[error("{0}")]
    Transaction(String),
}

impl ActionError {
    /// Stable, machine-readable name of the failure.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRecipient => "invalid_recipient",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidBody => "invalid_body",
            Self::InvalidAccount => "invalid_account",
            Self::InvalidOrigin(_) => "invalid_origin",
            Self::Upstream(_) => "upstream_failure",
            Self::Transaction(_) => "transaction_failure",
        }
    }
}

impl From<BlockhashError> for ActionError {
    fn from(err: BlockhashError) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::Upstream(UNKNOWN_ERROR_MESSAGE.to_owned())
        } else {
            Self::Upstream(message)
        }
    }
}

impl From<TransactionEncodeError> for ActionError {
    fn from(err: TransactionEncodeError) -> Self {
        Self::Transaction(err.to_string())
    }
}

impl From<url::ParseError> for ActionError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidOrigin(err.to_string())
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), error = %self, "Payment action request failed");
        let kind = HeaderValue::from_static(self.kind());
        let mut response = (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        response.headers_mut().insert(X_ACTION_ERROR_KIND, kind);
        response
    }
}
