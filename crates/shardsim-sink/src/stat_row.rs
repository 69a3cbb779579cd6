use chrono::{DateTime, Utc};
use serde::Serialize;
use shardsim_control::ControlPool;
use shardsim_types::BigInt;

/// One emitted-block record (spec §6 Output: the CSV header row). Numeric
/// fields are written as exact decimal strings; unset `f_*_min`/`p_*_min`
/// are written as the literal `nil`, matching the source's `safeStr`.
///
/// Derives `Serialize` so a row can also be handed to a JSON-line sink or
/// logged structurally (`tracing`'s `valuable`/`serde` bridges, or a future
/// second sink) without a bespoke conversion, though the CSV writer itself still
/// goes through `to_record` below, not this impl.
#[derive(Debug, Clone, Serialize)]
pub struct StatRow {
    pub block_height:      u64,
    pub tx_pool_size:       usize,
    pub tx_count:           usize,
    pub diff:               BigInt,
    pub balance:            BigInt,
    pub delta_balance:      BigInt,
    pub tax:                BigInt,
    pub subsidy:            BigInt,
    pub f_itx_min:          Option<BigInt>,
    pub f_ctx_min:          Option<BigInt>,
    pub p_itx_min:          Option<BigInt>,
    pub p_ctx_min:          Option<BigInt>,
    pub start_time:         DateTime<Utc>,
    pub end_time:           DateTime<Utc>,
    pub block_interval_ms:  i64
}

fn safe_str(v: &Option<BigInt>) -> String {
    match v {
        Some(v) => v.to_string(),
        None => "nil".to_string()
    }
}

impl StatRow {
    /// Assembles a row from the control pool's post-observe, pre-adjust
    /// state plus the packing metadata the control pool doesn't own.
    #[allow(clippy::too_many_arguments)]
    pub fn from_control(
        control: &ControlPool,
        block_height: u64,
        tx_pool_size: usize,
        tx_count: usize,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>
    ) -> Self {
        Self {
            block_height,
            tx_pool_size,
            tx_count,
            diff: control.diff_withsign().clone(),
            balance: control.balance().clone(),
            delta_balance: control.delta_balance().clone(),
            tax: control.tax().clone(),
            subsidy: control.subsidy().clone(),
            f_itx_min: control.f_itx_min().cloned(),
            f_ctx_min: control.f_ctx_min().cloned(),
            p_itx_min: control.p_itx_min().cloned(),
            p_ctx_min: control.p_ctx_min().cloned(),
            start_time,
            end_time,
            block_interval_ms: (end_time - start_time).num_milliseconds()
        }
    }

    pub const HEADER: [&'static str; 15] = [
        "Block Height",
        "TxPool Size",
        "# of all Txs",
        "Diff",
        "Balance",
        "DeltaBalance",
        "Tax",
        "Subsidy",
        "f_itx_min",
        "f_ctx_min",
        "P_itx_min",
        "P_ctx_min",
        "StartTime",
        "EndTime",
        "BlockInterval(ms)"
    ];

    pub fn to_record(&self) -> [String; 15] {
        [
            self.block_height.to_string(),
            self.tx_pool_size.to_string(),
            self.tx_count.to_string(),
            self.diff.to_string(),
            self.balance.to_string(),
            self.delta_balance.to_string(),
            self.tax.to_string(),
            self.subsidy.to_string(),
            safe_str(&self.f_itx_min),
            safe_str(&self.f_ctx_min),
            safe_str(&self.p_itx_min),
            safe_str(&self.p_ctx_min),
            self.start_time.to_rfc3339(),
            self.end_time.to_rfc3339(),
            self.block_interval_ms.to_string()
        ]
    }
}
