use chrono::Utc;
use shardsim_types::{BigInt, Transaction};

use crate::error::IngestError;

const SENDER_COL: usize = 3;
const RECIPIENT_COL: usize = 4;
const FILTER_A_COL: usize = 6;
const FILTER_B_COL: usize = 7;
const VALUE_COL: usize = 8;
const GAS_PRICE_COL: usize = 10;
const GAS_USED_COL: usize = 11;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Applies the acceptance filter to one CSV record and, if accepted,
/// parses it into a `Transaction`. Returns `Ok(None)` for rows the filter
/// silently rejects (spec §7: "ingestion malformed row"); returns `Err`
/// only for a row that passed the filter but then failed to parse as a
/// numeric field, or that `Transaction::new` itself rejects, both fatal
/// conditions since the filter is supposed to have already ruled them out.
pub fn parse_row(
    record: &csv::StringRecord,
    nonce: u64,
    shard_count: u64
) -> Result<Option<Transaction>, IngestError> {
    let (
        Some(sender_raw),
        Some(recipient_raw),
        Some(filter_a),
        Some(filter_b),
        Some(value_raw),
        Some(gas_price_raw),
        Some(gas_used_raw)
    ) = (
        record.get(SENDER_COL),
        record.get(RECIPIENT_COL),
        record.get(FILTER_A_COL),
        record.get(FILTER_B_COL),
        record.get(VALUE_COL),
        record.get(GAS_PRICE_COL),
        record.get(GAS_USED_COL)
    )
    else {
        return Ok(None);
    };

    if filter_a != "0" || filter_b != "0" {
        return Ok(None);
    }

    let sender = strip_hex_prefix(sender_raw);
    let recipient = strip_hex_prefix(recipient_raw);

    if sender.len() <= 16 || recipient.len() <= 16 || sender == recipient {
        return Ok(None);
    }

    let value = value_raw
        .parse::<BigInt>()
        .map_err(|_| IngestError::MalformedField { line: nonce, field: "value" })?;
    let gas_price = gas_price_raw
        .parse::<BigInt>()
        .map_err(|_| IngestError::MalformedField { line: nonce, field: "gas_price" })?;
    let gas_used = gas_used_raw
        .parse::<BigInt>()
        .map_err(|_| IngestError::MalformedField { line: nonce, field: "gas_used" })?;

    let tx = Transaction::new(
        sender.to_string(),
        recipient.to_string(),
        value,
        gas_price,
        gas_used,
        nonce,
        Utc::now(),
        shard_count
    )
    .map_err(|e| IngestError::transaction(e, nonce))?;

    Ok(Some(tx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    fn cols() -> Vec<&'static str> {
        vec!["_0", "_1", "_2", "", "", "_5", "0", "0", "1000", "_9", "21000", "1"]
    }

    #[test]
    fn accepts_a_well_formed_row() {
        let mut fields = cols();
        let sender = "0x".to_string() + &"a".repeat(20);
        let recipient = "0x".to_string() + &"b".repeat(20);
        fields[3] = Box::leak(sender.into_boxed_str());
        fields[4] = Box::leak(recipient.into_boxed_str());
        let rec = record(&fields);
        let tx = parse_row(&rec, 0, 4).unwrap().unwrap();
        assert_eq!(tx.nonce, 0);
    }

    #[test]
    fn rejects_row_failing_the_zero_column_filter() {
        let mut fields = cols();
        fields[6] = "1";
        let rec = record(&fields);
        assert!(parse_row(&rec, 0, 4).unwrap().is_none());
    }

    #[test]
    fn rejects_short_address() {
        let mut fields = cols();
        fields[3] = "0xshort";
        fields[4] = "0xalsoshortaddress1234";
        let rec = record(&fields);
        assert!(parse_row(&rec, 0, 4).unwrap().is_none());
    }

    #[test]
    fn rejects_identical_sender_and_recipient() {
        let mut fields = cols();
        let addr = "0x".to_string() + &"c".repeat(20);
        fields[3] = Box::leak(addr.clone().into_boxed_str());
        fields[4] = Box::leak(addr.into_boxed_str());
        let rec = record(&fields);
        assert!(parse_row(&rec, 0, 4).unwrap().is_none());
    }

    #[test]
    fn fatal_on_unparseable_value_after_passing_filter() {
        let mut fields = cols();
        fields[3] = Box::leak(("0x".to_string() + &"a".repeat(20)).into_boxed_str());
        fields[4] = Box::leak(("0x".to_string() + &"b".repeat(20)).into_boxed_str());
        fields[8] = "not-a-number";
        let rec = record(&fields);
        assert!(parse_row(&rec, 0, 4).is_err());
    }

    #[test]
    fn missing_column_is_silently_skipped() {
        let rec = record(&["only", "three", "cols"]);
        assert!(parse_row(&rec, 0, 4).unwrap().is_none());
    }
}
