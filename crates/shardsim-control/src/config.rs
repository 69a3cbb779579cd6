use shardsim_types::BigInt;

/// Tunables for the control loop (spec §6 Configuration, `delta_base` /
/// `ε_*` / `factor_*` rows).
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Number of shards, `N` in spec §4.6's `(N-1)` multiplier.
    pub shard_count:        u64,
    /// Target block size; also the short-block threshold of spec §4.5
    /// step 6.
    pub block_size:         usize,
    /// Base adjustment step `Δ`.
    pub delta_base:         BigInt,
    pub eps_delay:          BigInt,
    pub eps_balance:        BigInt,
    pub eps_delta_balance:  BigInt,
    pub factor_min:         f64,
    pub factor_max:         f64
}

impl Default for ControlConfig {
    /// Defaults from spec §6: `delta_base = 10^11`, `eps_delay = 10^13`,
    /// `eps_balance = 10^17`, `eps_delta_balance = 10^16`,
    /// `factor_min/max = 1.0/8.0`.
    fn default() -> Self {
        Self {
            shard_count:       4,
            block_size:        1000,
            delta_base:        BigInt::from(100_000_000_000i64),
            eps_delay:         BigInt::from(10_000_000_000_000i64),
            eps_balance:       BigInt::from(100_000_000_000_000_000i64),
            eps_delta_balance: BigInt::from(10_000_000_000_000_000i64),
            factor_min:        1.0,
            factor_max:        8.0
        }
    }
}
