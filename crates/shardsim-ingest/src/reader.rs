use std::fs::File;
use std::time::{Duration, Instant};

use shardsim_pool::PendingPool;
use shardsim_types::shard_of;
use tokio::sync::mpsc;
use tracing::info;

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::row::parse_row;

const LOG_INTERVAL: Duration = Duration::from_secs(2);

/// Only shard 0 is ever packed by this simulator (spec §1, §4.7); rows
/// whose sender doesn't map there are dropped before they reach the pool.
const TARGET_SHARD: u64 = 0;

/// Reads the input file to exhaustion (or until `data_cap` accepted rows
/// have been ingested), gated by a one-slot fetch-token channel: one batch
/// of at most `batch_size` accepted rows is appended to `pool` per token
/// received (spec §5). Runs on a blocking thread since `csv::Reader` is
/// synchronous; `token_rx` and the return channel use the blocking variants
/// of the async primitives to bridge the two worlds.
///
/// Rows are further filtered to the target shard (spec §4.7: `shard_of(sender)
/// == 0`) before being appended; only survivors of both the row-level
/// acceptance filter and this shard filter ever reach the pending pool.
///
/// Returns the total number of rows accepted (i.e. appended to the pool,
/// post shard filter). A row that fails the acceptance filter is skipped
/// silently; a row that passes the filter but then fails to parse is a
/// fatal error (spec §7) and aborts the worker.
pub fn run(
    config: IngestConfig,
    pool: PendingPool,
    shard_count: u64,
    mut token_rx: mpsc::Receiver<()>
) -> Result<u64, IngestError> {
    let file = File::open(&config.input_path).map_err(IngestError::Open)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let start = Instant::now();
    let mut last_log = start;
    let mut accepted: u64 = 0;
    let mut filter_passed: u64 = 0;
    let mut seen: u64 = 0;
    let mut records = csv_reader.records();
    let mut exhausted = false;

    while !exhausted {
        if token_rx.blocking_recv().is_none() {
            break;
        }

        let mut batch = Vec::with_capacity(config.batch_size);
        while batch.len() < config.batch_size {
            if let Some(cap) = config.data_cap {
                if accepted >= cap {
                    exhausted = true;
                    break;
                }
            }

            let Some(record) = records.next() else {
                exhausted = true;
                break;
            };
            let record = record?;
            seen += 1;

            if let Some(tx) = parse_row(&record, filter_passed, shard_count)? {
                filter_passed += 1;
                // spec §4.7: the driver only hands shard-0 survivors to the
                // pending pool. The nonce above still runs over every row
                // the acceptance filter admitted, not just the ones this
                // shard keeps, so it stays a monotone ingestion-order index.
                //
                // `shard_of` cannot fail here: `Transaction::new` already
                // computed it (and would have panicked) while classifying
                // `tx.is_cross_shard`.
                let sender_shard =
                    shard_of(&tx.sender, shard_count).expect("sender hex already validated by Transaction::new");
                if sender_shard == TARGET_SHARD {
                    accepted += 1;
                    batch.push(tx);
                }
            }

            if last_log.elapsed() >= LOG_INTERVAL {
                info!(
                    accepted,
                    filter_passed,
                    seen,
                    elapsed_secs = start.elapsed().as_secs_f64(),
                    "ingestion progress"
                );
                last_log = Instant::now();
            }
        }

        if !batch.is_empty() {
            pool.add_batch(batch);
        }
    }

    info!(accepted, seen, elapsed_secs = start.elapsed().as_secs_f64(), "ingestion complete");
    Ok(accepted)
}
