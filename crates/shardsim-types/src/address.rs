//! Maps an address to a shard index.
//!
//! Addresses are plain hex strings (no `0x` prefix by the time they reach
//! this function (stripping that prefix is ingestion's job). The mapping
//! takes the low-order 8 hex characters, parses them as an unsigned 64-bit
//! integer, and reduces modulo the shard count.

use crate::error::AddressError;

/// Number of trailing hex characters consulted. An address shorter than
/// this contributes its entire length instead (spec §4.1).
const SUFFIX_LEN: usize = 8;

/// Maps `address` to a shard index in `[0, shard_count)`.
///
/// # Errors
///
/// Returns [`AddressError::MalformedHex`] if the consulted suffix isn't
/// valid hex. Per spec §4.1 this is a precondition violation: the only
/// caller is ingestion, which has already filtered any row that would
/// trigger it, so callers downstream of ingestion are expected to treat
/// this as fatal rather than recoverable.
pub fn shard_of(address: &str, shard_count: u64) -> Result<u64, AddressError> {
    let suffix_start = address.len().saturating_sub(SUFFIX_LEN);
    let suffix = &address[suffix_start..];
    let value = u64::from_str_radix(suffix, 16)
        .map_err(|_| AddressError::MalformedHex(address.to_owned()))?;
    Ok(value % shard_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_uses_whole_string() {
        assert_eq!(shard_of("ab", 4).unwrap(), 0xab % 4);
    }

    #[test]
    fn long_address_uses_last_eight_chars() {
        let addr = "00000000000000000000000000000000000000deadbeef";
        assert_eq!(shard_of(addr, 4).unwrap(), 0xdeadbeefu64 % 4);
    }

    #[test]
    fn malformed_hex_is_an_error() {
        assert!(shard_of("not-hex!", 4).is_err());
    }

    #[test]
    fn shard_count_one_always_maps_to_zero() {
        assert_eq!(shard_of("ffffffff", 1).unwrap(), 0);
    }
}
