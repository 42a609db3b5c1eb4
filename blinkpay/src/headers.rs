//! Response headers required by action clients.
//!
//! Blink renderers fetch action endpoints cross-origin from arbitrary sites,
//! so every response (errors included) must carry permissive CORS headers
//! plus the action version and the blockchain the action targets.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS,
};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Action protocol version advertised to clients.
pub const ACTION_VERSION: &str = "2.1.3";

/// Header carrying the action protocol version (server → client).
pub const X_ACTION_VERSION: HeaderName = HeaderName::from_static("x-action-version");

/// Header carrying the CAIP-2 chain ids the action targets (server → client).
pub const X_BLOCKCHAIN_IDS: HeaderName = HeaderName::from_static("x-blockchain-ids");

/// Header carrying the machine-readable kind of a failed request.
pub const X_ACTION_ERROR_KIND: HeaderName = HeaderName::from_static("x-action-error-kind");

/// Methods action clients may use.
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,OPTIONS";

/// Request headers action clients may send.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding, X-Accept-Action-Version, X-Accept-Blockchain-Ids";

/// Response headers exposed to cross-origin scripts.
pub const EXPOSED_HEADERS: &str = "X-Action-Version, X-Blockchain-Ids, X-Action-Error-Kind";

/// The header set attached to every action response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHeaders {
    /// Value of `X-Action-Version`.
    pub action_version: String,
    /// CAIP-2 chain ids, joined with `,` in `X-Blockchain-Ids`.
    pub blockchain_ids: Vec<String>,
}

impl ActionHeaders {
    /// Headers for an action targeting a single chain.
    pub fn for_chain(caip2: impl Into<String>) -> Self {
        Self {
            action_version: ACTION_VERSION.to_owned(),
            blockchain_ids: vec![caip2.into()],
        }
    }

    /// Builds the header map.
    ///
    /// # Errors
    ///
    /// Returns an error if the version or a chain id contains characters not
    /// allowed in a header value.
    pub fn to_header_map(&self) -> Result<HeaderMap, http::header::InvalidHeaderValue> {
        let mut headers = HeaderMap::with_capacity(6);
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(
            ACCESS_CONTROL_EXPOSE_HEADERS,
            HeaderValue::from_static(EXPOSED_HEADERS),
        );
        headers.insert(
            X_ACTION_VERSION,
            HeaderValue::from_str(&self.action_version)?,
        );
        headers.insert(
            X_BLOCKCHAIN_IDS,
            HeaderValue::from_str(&self.blockchain_ids.join(","))?,
        );
        Ok(headers)
    }
}
