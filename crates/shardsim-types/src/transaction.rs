use chrono::{DateTime, Utc};

use crate::{address::shard_of, error::TransactionError, BigInt};

/// A single historical transaction record.
///
/// `shard_id` and `block_height` are zero until the pending pool's `pack`
/// operation assigns them; `is_cross_shard` is computed once at
/// construction and never changes (spec §3 invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender:         String,
    pub recipient:      String,
    pub value:          BigInt,
    pub gas_price:      BigInt,
    pub gas_used:       BigInt,
    pub nonce:          u64,
    pub timestamp:      DateTime<Utc>,
    pub shard_id:       u64,
    pub block_height:   u64,
    pub is_cross_shard: bool
}

/// Addresses shorter than this many characters can never be distinct,
/// sane addresses (spec §3: "length > 16").
const MIN_ADDRESS_LEN: usize = 16;

impl Transaction {
    /// Builds a transaction record, classifying it as intra- or cross-shard
    /// under `shard_count` shards.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError`] if `sender` and `recipient` are equal or
    /// either is too short. These are the only two checks this constructor
    /// performs; the "sentinel columns both `0`" check of spec §4.2 is a
    /// property of the *source row*, not of the transaction itself, and is
    /// ingestion's responsibility.
    ///
    /// # Panics
    ///
    /// Panics if `sender` or `recipient` isn't valid hex once the two
    /// checks above pass (spec §7: address hex parse failure is a fatal
    /// precondition violation, not a recoverable row error, and ingestion must
    /// have already guaranteed hex-ness by the time it calls this).
    pub fn new(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        value: BigInt,
        gas_price: BigInt,
        gas_used: BigInt,
        nonce: u64,
        timestamp: DateTime<Utc>,
        shard_count: u64
    ) -> Result<Self, TransactionError> {
        let sender = sender.into();
        let recipient = recipient.into();

        if sender.len() <= MIN_ADDRESS_LEN {
            let len = sender.len();
            return Err(TransactionError::AddressTooShort(sender, len));
        }
        if recipient.len() <= MIN_ADDRESS_LEN {
            let len = recipient.len();
            return Err(TransactionError::AddressTooShort(recipient, len));
        }
        if sender == recipient {
            return Err(TransactionError::SenderEqualsRecipient(sender));
        }

        let is_cross_shard = {
            let sender_shard = shard_of(&sender, shard_count)
                .expect("ingestion must filter non-hex addresses before constructing a Transaction");
            let recipient_shard = shard_of(&recipient, shard_count)
                .expect("ingestion must filter non-hex addresses before constructing a Transaction");
            sender_shard != recipient_shard
        };

        Ok(Self {
            sender,
            recipient,
            value,
            gas_price,
            gas_used,
            nonce,
            timestamp,
            shard_id: 0,
            block_height: 0,
            is_cross_shard
        })
    }

    /// Raw fee: `gas_price * gas_used`.
    pub fn raw_fee(&self) -> BigInt {
        &self.gas_price * &self.gas_used
    }
}
