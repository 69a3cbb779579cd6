use std::path::PathBuf;

use clap::Parser;

/// Configuration constants recognized by the simulator (spec §6
/// Configuration). Defaults mirror the source's own constants.
#[derive(Parser, Debug)]
#[clap(about = "Shard transaction simulator")]
pub struct Cli {
    /// path to the comma-separated transaction input file.
    #[clap(long, default_value = "./filtered_transactions.csv")]
    pub input: PathBuf,

    /// directory the result CSV is written into.
    #[clap(long, default_value = "./outputCSV")]
    pub output_dir: PathBuf,

    /// directory the plaintext progress log is written into.
    #[clap(long, default_value = "./logs")]
    pub log_dir: PathBuf,

    /// number of shards; divisor in address→shard mapping.
    #[clap(long, default_value_t = 4)]
    pub shard_count: u64,

    /// max transactions per block; also the short-block threshold.
    #[clap(long, default_value_t = 1000)]
    pub block_size: usize,

    /// ingestion chunk size.
    #[clap(long, default_value_t = 10_000)]
    pub batch_size: usize,

    /// optional cap on the number of accepted rows to ingest.
    #[clap(long)]
    pub data_cap: Option<u64>,

    /// optional cap on the number of blocks the driver will emit.
    #[clap(long)]
    pub max_blocks: Option<u64>,

    /// base adjustment step for the control loop.
    #[clap(long, default_value_t = 100_000_000_000)]
    pub delta_base: i64,

    /// latency-gap tolerance before the control loop reacts.
    #[clap(long, default_value_t = 10_000_000_000_000)]
    pub eps_delay: i64,

    /// fiscal-balance tolerance.
    #[clap(long, default_value_t = 100_000_000_000_000_000)]
    pub eps_balance: i64,

    /// fiscal delta-balance tolerance.
    #[clap(long, default_value_t = 10_000_000_000_000_000)]
    pub eps_delta_balance: i64,

    /// lower clamp on the proportional adjustment factor.
    #[clap(long, default_value_t = 1.0)]
    pub factor_min: f64,

    /// upper clamp on the proportional adjustment factor.
    #[clap(long, default_value_t = 8.0)]
    pub factor_max: f64
}
