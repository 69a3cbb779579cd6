use std::time::Duration;

use chrono::Utc;
use num_bigint::BigInt;
use shardsim_control::{ControlConfig, ControlPool};
use shardsim_ingest::{reader, IngestConfig};
use shardsim_pool::PendingPool;
use shardsim_sink::{csv_writer, StatRow};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::cli::Cli;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const TOKEN_CHANNEL_CAPACITY: usize = 1;
const STATS_CHANNEL_CAPACITY: usize = 4096;

/// Owns every long-lived piece of the simulation: the pending pool, the
/// control pool, and the channels wiring the ingestion and sink workers to
/// the driver loop (spec §5, §9).
pub struct Simulation {
    cli:     Cli,
    pool:    PendingPool,
    control: ControlPool
}

impl Simulation {
    pub fn new(cli: Cli) -> Self {
        let control_config = ControlConfig {
            shard_count:       cli.shard_count,
            block_size:        cli.block_size,
            delta_base:        BigInt::from(cli.delta_base),
            eps_delay:         BigInt::from(cli.eps_delay),
            eps_balance:       BigInt::from(cli.eps_balance),
            eps_delta_balance: BigInt::from(cli.eps_delta_balance),
            factor_min:        cli.factor_min,
            factor_max:        cli.factor_max
        };
        Self { pool: PendingPool::new(), control: ControlPool::new(control_config), cli }
    }

    /// Spawns the ingestion and sink workers and runs the pack → observe →
    /// adjust → emit driver loop to completion.
    pub async fn run(mut self) -> eyre::Result<u64> {
        let (token_tx, token_rx) = mpsc::channel::<()>(TOKEN_CHANNEL_CAPACITY);
        let (rows_tx, rows_rx) = mpsc::channel::<StatRow>(STATS_CHANNEL_CAPACITY);

        let ingest_config =
            IngestConfig::new(self.cli.input.clone(), self.cli.batch_size, self.cli.data_cap);
        let ingest_pool = self.pool.clone();
        let shard_count = self.cli.shard_count;
        let ingest_handle: JoinHandle<Result<u64, shardsim_ingest::IngestError>> =
            tokio::task::spawn_blocking(move || {
                reader::run(ingest_config, ingest_pool, shard_count, token_rx)
            });

        let output_dir = self.cli.output_dir.clone();
        let sink_handle: JoinHandle<Result<(), shardsim_sink::SinkError>> =
            tokio::task::spawn_blocking(move || csv_writer::run(&output_dir, rows_rx));

        let mut block_height: u64 = 1;
        let mut ingest_done = false;

        loop {
            if let Some(cap) = self.cli.max_blocks {
                if block_height > cap {
                    break;
                }
            }

            if !ingest_done {
                let _ = token_tx.try_send(());
            }

            let tx_pool_size = self.pool.len();
            let snapshot = self.control.snapshot();
            let start_time = Utc::now();
            let mut block = self.pool.pack(self.cli.block_size, &snapshot);

            if block.is_empty() {
                if ingest_handle.is_finished() {
                    ingest_done = true;
                }
                if ingest_done {
                    break;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
                continue;
            }

            for tx in block.iter_mut() {
                tx.shard_id = 0;
                tx.block_height = block_height;
            }
            let tx_count = block.len();

            self.control.observe(&block);
            let end_time = Utc::now();
            let row = StatRow::from_control(
                &self.control,
                block_height,
                tx_pool_size,
                tx_count,
                start_time,
                end_time
            );
            self.control.adjust();

            if rows_tx.send(row).await.is_err() {
                break;
            }

            info!(block_height, tx_count, "block packed");
            block_height += 1;
        }

        drop(rows_tx);
        drop(token_tx);

        let ingested = ingest_handle.await??;
        sink_handle.await??;

        Ok(ingested)
    }
}
