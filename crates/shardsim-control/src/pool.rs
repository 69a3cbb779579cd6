use shardsim_types::{BigInt, ControlSnapshot, Transaction};

use crate::adjuster::{ProportionalDeadBandAdjuster, TaxAdjuster};
use crate::config::ControlConfig;
use crate::state::ControlState;

/// Owns a shard's economic state and the control law that steers it.
/// `observe` and `adjust` are kept as two calls, not one, so a driver can
/// snapshot the post-observe, pre-adjust row for its stats sink before the
/// law mutates `tax`/`subsidy` for the next block (spec §4.5, §4.6).
pub struct ControlPool {
    state:    ControlState,
    adjuster: Box<dyn TaxAdjuster>
}

impl ControlPool {
    pub fn new(config: ControlConfig) -> Self {
        Self::with_adjuster(config, Box::new(ProportionalDeadBandAdjuster))
    }

    pub fn with_adjuster(config: ControlConfig, adjuster: Box<dyn TaxAdjuster>) -> Self {
        Self { state: ControlState::new(config), adjuster }
    }

    pub fn snapshot(&self) -> ControlSnapshot {
        self.state.snapshot()
    }

    pub fn observe(&mut self, block: &[Transaction]) {
        self.state.observe(block);
    }

    pub fn adjust(&mut self) {
        self.adjuster.adjust(&mut self.state);
    }

    pub fn tax(&self) -> &BigInt {
        &self.state.tax
    }

    pub fn subsidy(&self) -> &BigInt {
        &self.state.subsidy
    }

    pub fn diff(&self) -> &BigInt {
        &self.state.diff
    }

    pub fn diff_withsign(&self) -> &BigInt {
        &self.state.diff_withsign
    }

    pub fn balance(&self) -> &BigInt {
        &self.state.balance
    }

    pub fn delta_balance(&self) -> &BigInt {
        &self.state.delta_balance
    }

    pub fn n_itx(&self) -> u64 {
        self.state.n_itx
    }

    pub fn n_ctx(&self) -> u64 {
        self.state.n_ctx
    }

    pub fn f_itx_min(&self) -> Option<&BigInt> {
        self.state.f_itx_min.as_ref()
    }

    pub fn f_ctx_min(&self) -> Option<&BigInt> {
        self.state.f_ctx_min.as_ref()
    }

    pub fn p_itx_min(&self) -> Option<&BigInt> {
        self.state.p_itx_min.as_ref()
    }

    pub fn p_ctx_min(&self) -> Option<&BigInt> {
        self.state.p_ctx_min.as_ref()
    }
}
