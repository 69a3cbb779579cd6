use std::fs::{self, File};
use std::path::Path;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::error::SinkError;
use crate::stat_row::StatRow;

/// Creates `<output_dir>/shard_<timestamp>.csv`, writes the header row, and
/// drains `rows_rx` to completion, writing one row per received `StatRow`
/// (spec §6 Output). Runs on a blocking thread since `csv::Writer` is
/// synchronous.
pub fn run(output_dir: &Path, mut rows_rx: mpsc::Receiver<StatRow>) -> Result<(), SinkError> {
    fs::create_dir_all(output_dir).map_err(|source| SinkError::CreateDir {
        path: output_dir.display().to_string(),
        source
    })?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = output_dir.join(format!("shard_{timestamp}.csv"));
    let file = File::create(&filename).map_err(|source| SinkError::CreateFile {
        path: filename.display().to_string(),
        source
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(StatRow::HEADER)?;

    while let Some(row) = rows_rx.blocking_recv() {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}
