//! Base64 transport encoding for serialized transactions.

use std::fmt::{self, Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use serde::{Deserialize, Serialize};

/// Standard-alphabet, padded base64 text carrying binary wire data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Base64Payload(String);

impl Base64Payload {
    /// Encodes raw bytes.
    pub fn encode<T: AsRef<[u8]>>(bytes: T) -> Self {
        Self(b64.encode(bytes.as_ref()))
    }

    /// Decodes back to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        b64.decode(&self.0)
    }

    /// Returns the encoded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the payload, returning the encoded text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Base64Payload {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl Display for Base64Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
