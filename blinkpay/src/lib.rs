#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for Solana Actions payment endpoints.
//!
//! An Action is a GET/POST contract that lets a wallet or a blink client
//! discover a payment, render it, and receive an unsigned transaction to
//! sign. This crate holds the chain-agnostic pieces of that contract;
//! Solana transaction building lives in `blinkpay-svm`.
//!
//! # Modules
//!
//! - [`amount`] - Human-readable currency amount parsing and base-unit conversion
//! - [`encoding`] - Base64 wrapper used for serialized transactions
//! - [`headers`] - Cross-origin and version headers required by action clients
//! - [`proto`] - Wire format for `actions.json` and the GET/POST payloads

pub mod amount;
pub mod encoding;
pub mod headers;
pub mod proto;

pub use amount::{AmountError, CoinAmount};
pub use proto::{
    ActionGetResponse, ActionLinks, ActionPostRequest, ActionPostResponse, ActionRule,
    ActionsJson, LinkedAction,
};
