use thiserror::Error;

/// Raised by [`crate::address::shard_of`] when an address cannot be
/// interpreted as hex. This is a precondition violation: ingestion must
/// already have filtered any row that would trigger it.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address {0:?} is not valid hex and cannot be mapped to a shard")]
    MalformedHex(String),
}

/// Raised while constructing a [`crate::Transaction`] from a candidate row.
/// Ingestion treats every variant here as "skip this row silently"
/// (spec §7); a caller that already applied the row filter should never see
/// one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("sender and recipient must differ, both were {0:?}")]
    SenderEqualsRecipient(String),
    #[error("address {0:?} has length {1}, expected more than 16")]
    AddressTooShort(String, usize),
}
