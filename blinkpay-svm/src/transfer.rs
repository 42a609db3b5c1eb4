//! Native SOL transfer construction.
//!
//! Produces a legacy transaction with a single System Program `Transfer`
//! instruction. The sender pays the fee and is the only required signer; its
//! signature slot is left zero-filled for the wallet to fill in.

use blinkpay::amount::{AmountError, CoinAmount};
use blinkpay::encoding::Base64Payload;
use solana_message::Message;
use solana_native_token::LAMPORTS_PER_SOL;
use solana_pubkey::Pubkey;
use solana_transaction::Transaction;

use crate::error::TransactionEncodeError;
use crate::rpc::RecentBlockhash;

/// Converts whole SOL into lamports without floating-point rounding.
///
/// # Errors
///
/// Returns [`AmountError::TooPrecise`] below one lamport of precision, or
/// [`AmountError::Overflow`] if the lamport count exceeds `u64`.
pub fn sol_to_lamports(amount: &CoinAmount) -> Result<u64, AmountError> {
    amount.to_base_units(LAMPORTS_PER_SOL)
}

/// A lamport transfer between two accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTransfer {
    /// Paying account; also the fee payer.
    pub from: Pubkey,
    /// Receiving account.
    pub to: Pubkey,
    /// Amount in lamports.
    pub lamports: u64,
}

impl NativeTransfer {
    /// Creates a transfer of `lamports` from `from` to `to`.
    #[must_use]
    pub const fn new(from: Pubkey, to: Pubkey, lamports: u64) -> Self {
        Self { from, to, lamports }
    }

    /// Builds the unsigned transaction bound to `recent`.
    #[must_use]
    pub fn build_unsigned(&self, recent: &RecentBlockhash) -> UnsignedTransfer {
        let instruction =
            solana_system_interface::instruction::transfer(&self.from, &self.to, self.lamports);
        let message =
            Message::new_with_blockhash(&[instruction], Some(&self.from), &recent.blockhash);
        #[cfg(feature = "telemetry")]
        tracing::debug!(
            from = %self.from,
            to = %self.to,
            lamports = self.lamports,
            last_valid_block_height = recent.last_valid_block_height,
            "Built unsigned transfer"
        );
        UnsignedTransfer {
            transaction: Transaction::new_unsigned(message),
            last_valid_block_height: recent.last_valid_block_height,
        }
    }
}

/// An unsigned transfer transaction and its expiry height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransfer {
    transaction: Transaction,
    last_valid_block_height: u64,
}

impl UnsignedTransfer {
    /// The transaction.
    #[must_use]
    pub const fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Block height after which the transaction can no longer land.
    #[must_use]
    pub const fn last_valid_block_height(&self) -> u64 {
        self.last_valid_block_height
    }

    /// The fee payer, which is always the first account key.
    #[must_use]
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.transaction.message.account_keys.first()
    }

    /// Serializes the transaction in wire format and base64-encodes it.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionEncodeError`] if serialization fails.
    pub fn as_base64(&self) -> Result<Base64Payload, TransactionEncodeError> {
        let bytes = bincode::serialize(&self.transaction)
            .map_err(|e| TransactionEncodeError(format!("{e}")))?;
        Ok(Base64Payload::encode(bytes))
    }
}
