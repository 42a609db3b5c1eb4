//! Public key parsing.

use std::str::FromStr;

use solana_pubkey::Pubkey;

use crate::error::InvalidAddress;

/// Parses a base58-encoded public key.
///
/// # Errors
///
/// Returns [`InvalidAddress`] if the text is not base58 or does not decode
/// to exactly 32 bytes.
pub fn parse_address(input: &str) -> Result<Pubkey, InvalidAddress> {
    Pubkey::from_str(input).map_err(|_| InvalidAddress {
        input: input.to_owned(),
    })
}

/// Resolves the payment recipient from an optional `to` query value.
///
/// Absent or empty values fall back to `default`.
///
/// # Errors
///
/// Returns [`InvalidAddress`] if a non-empty value is not a public key.
pub fn resolve_recipient(to: Option<&str>, default: Pubkey) -> Result<Pubkey, InvalidAddress> {
    match to {
        None | Some("") => Ok(default),
        Some(value) => parse_address(value),
    }
}
