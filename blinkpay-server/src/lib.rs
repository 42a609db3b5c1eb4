//! Solana Actions payment server.
//!
//! Serves the discovery manifest, the payment action metadata, and the
//! unsigned transfer transactions that blink clients hand to a wallet for
//! signing.
//!
//! # Modules
//!
//! - [`handlers`] - Axum route handlers and router builder
//! - [`error`] - Request error types and their HTTP mapping
//! - [`config`] - Server configuration with environment variable expansion

pub mod config;
pub mod error;
pub mod handlers;

pub use handlers::{ActionState, PaymentAction, action_router};
