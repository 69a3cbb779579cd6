//! Value types shared by the shard simulator: the address-to-shard map and
//! the transaction record it classifies.

pub mod address;
pub mod control_snapshot;
pub mod error;
pub mod transaction;

pub use address::shard_of;
pub use control_snapshot::ControlSnapshot;
pub use error::{AddressError, TransactionError};
pub use transaction::Transaction;

/// The arbitrary-precision signed integer type used for every economic
/// quantity in the simulator (fees, tax, subsidy, balances).
pub type BigInt = num_bigint::BigInt;
