use num_traits::{Signed, Zero};
use shardsim_types::{BigInt, ControlSnapshot, Transaction};

use crate::config::ControlConfig;

/// The economic state of a single shard's control pool (spec §3, "Control
/// pool" table). All numeric fields are arbitrary-precision signed
/// integers, initialized to zero.
#[derive(Debug, Clone)]
pub struct ControlState {
    pub config: ControlConfig,

    pub tax:     BigInt,
    pub subsidy: BigInt,

    pub n_itx: u64,
    pub n_ctx: u64,

    pub total_tax:     BigInt,
    pub total_subsidy: BigInt,
    pub total_tax_i:   BigInt,
    pub total_subsidy_i: BigInt,

    pub f_itx_min: Option<BigInt>,
    pub f_ctx_min: Option<BigInt>,
    pub p_itx_min: Option<BigInt>,
    pub p_ctx_min: Option<BigInt>,

    pub diff_withsign: BigInt,
    pub diff:           BigInt,
    pub balance:        BigInt,
    pub delta_balance:  BigInt
}

impl ControlState {
    pub fn new(config: ControlConfig) -> Self {
        Self {
            config,
            tax: BigInt::zero(),
            subsidy: BigInt::zero(),
            n_itx: 0,
            n_ctx: 0,
            total_tax: BigInt::zero(),
            total_subsidy: BigInt::zero(),
            total_tax_i: BigInt::zero(),
            total_subsidy_i: BigInt::zero(),
            f_itx_min: None,
            f_ctx_min: None,
            p_itx_min: None,
            p_ctx_min: None,
            diff_withsign: BigInt::zero(),
            diff: BigInt::zero(),
            balance: BigInt::zero(),
            delta_balance: BigInt::zero()
        }
    }

    /// A borrow of the decision variables the packing selector needs.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot { tax: self.tax.clone(), subsidy: self.subsidy.clone() }
    }

    /// The observe step (spec §4.5): recomputes every per-block aggregate
    /// from the block just packed, in one atomic pass.
    pub fn observe(&mut self, block: &[Transaction]) {
        let prev_balance = self.balance.clone();
        self.n_itx = 0;
        self.n_ctx = 0;
        self.total_tax_i = BigInt::zero();
        self.total_subsidy_i = BigInt::zero();
        self.delta_balance = BigInt::zero();

        let tax = self.tax.clone();
        let subsidy = self.subsidy.clone();

        let mut f_itx_min: Option<BigInt> = None;
        let mut f_ctx_min: Option<BigInt> = None;

        for tx in block {
            let fee = tx.raw_fee();
            if tx.is_cross_shard {
                self.n_ctx += 1;
                self.total_subsidy += &subsidy;
                self.total_subsidy_i += &subsidy;
                self.delta_balance -= &subsidy;
                f_ctx_min = Some(match f_ctx_min {
                    Some(cur) if cur <= fee => cur,
                    _ => fee
                });
            } else {
                self.n_itx += 1;
                self.total_tax += &tax;
                self.total_tax_i += &tax;
                self.delta_balance += &tax;
                f_itx_min = Some(match f_itx_min {
                    Some(cur) if cur <= fee => cur,
                    _ => fee
                });
            }
        }

        self.balance = &prev_balance + &self.delta_balance;

        // Step 4: a denominator guard for any v2-style divisor, not a
        // correction to the reported counts (spec §9 open question, this
        // confines the floor to computations that need it; `n_itx`/`n_ctx`
        // stay truthful in every getter and in the CSV row).

        match (f_itx_min, f_ctx_min) {
            (None, None) => {
                self.f_itx_min = None;
                self.f_ctx_min = None;
                self.p_itx_min = None;
                self.p_ctx_min = None;
                self.diff_withsign = BigInt::zero();
                self.diff = BigInt::zero();
            }
            (None, Some(ctx_min)) => {
                self.p_itx_min = None;
                self.p_ctx_min = None;
                if block.len() < self.config.block_size {
                    self.diff_withsign = BigInt::zero();
                    self.diff = BigInt::zero();
                } else {
                    self.diff_withsign = -&ctx_min;
                    self.diff = ctx_min.abs();
                }
                self.f_itx_min = None;
                self.f_ctx_min = Some(ctx_min);
            }
            (Some(itx_min), None) => {
                self.p_itx_min = None;
                self.p_ctx_min = None;
                if block.len() < self.config.block_size {
                    self.diff_withsign = BigInt::zero();
                    self.diff = BigInt::zero();
                } else {
                    self.diff_withsign = itx_min.clone();
                    self.diff = itx_min.abs();
                }
                self.f_ctx_min = None;
                self.f_itx_min = Some(itx_min);
            }
            (Some(itx_min), Some(ctx_min)) => {
                self.diff_withsign = &ctx_min - &itx_min;
                self.diff = self.diff_withsign.abs();
                self.p_itx_min = Some(&itx_min - &tax);
                self.p_ctx_min = Some((&ctx_min / 2) + &subsidy);
                self.f_itx_min = Some(itx_min);
                self.f_ctx_min = Some(ctx_min);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn make_addr(unique: u64, shard_suffix: u32) -> String {
        format!("{unique:024x}{shard_suffix:08x}")
    }

    fn intra(raw_fee: i64, nonce: u64) -> Transaction {
        Transaction::new(
            make_addr(nonce * 2, 0x10),
            make_addr(nonce * 2 + 1, 0x10),
            BigInt::zero(),
            BigInt::from(raw_fee),
            BigInt::from(1),
            nonce,
            Utc::now(),
            4
        )
        .unwrap()
    }

    fn cross(raw_fee: i64, nonce: u64) -> Transaction {
        Transaction::new(
            make_addr(nonce * 2, 0x10),
            make_addr(nonce * 2 + 1, 0x11),
            BigInt::zero(),
            BigInt::from(raw_fee),
            BigInt::from(1),
            nonce,
            Utc::now(),
            4
        )
        .unwrap()
    }

    #[test]
    fn s1_single_intra_block_zero_control() {
        let mut state = ControlState::new(ControlConfig { block_size: 10, ..Default::default() });
        let block = vec![intra(100, 0), intra(200, 1), intra(50, 2)];
        state.observe(&block);
        assert_eq!(state.n_itx, 3);
        assert_eq!(state.n_ctx, 0);
        assert_eq!(state.f_itx_min, Some(BigInt::from(50)));
        assert_eq!(state.diff, BigInt::zero());
        assert_eq!(state.diff_withsign, BigInt::zero());
        assert_eq!(state.balance, BigInt::zero());
    }

    #[test]
    fn s2_mixed_block_nonzero_tax_and_subsidy() {
        let mut state = ControlState::new(ControlConfig { block_size: 10, ..Default::default() });
        state.tax = BigInt::from(10);
        state.subsidy = BigInt::from(5);
        let block = vec![intra(100, 0), intra(30, 1), cross(40, 2)];
        state.observe(&block);
        assert_eq!(state.total_tax_i, BigInt::from(20));
        assert_eq!(state.total_subsidy_i, BigInt::from(5));
        assert_eq!(state.delta_balance, BigInt::from(15));
        assert_eq!(state.f_itx_min, Some(BigInt::from(30)));
        assert_eq!(state.f_ctx_min, Some(BigInt::from(40)));
        assert_eq!(state.diff_withsign, BigInt::from(10));
        assert_eq!(state.diff, BigInt::from(10));
        assert_eq!(state.p_itx_min, Some(BigInt::from(20)));
        assert_eq!(state.p_ctx_min, Some(BigInt::from(25)));
    }

    #[test]
    fn short_block_with_only_cross_is_balanced() {
        let mut state = ControlState::new(ControlConfig { block_size: 10, ..Default::default() });
        let block = vec![cross(2000, 0)];
        state.observe(&block);
        assert_eq!(state.diff, BigInt::zero());
        assert_eq!(state.diff_withsign, BigInt::zero());
    }

    #[test]
    fn full_block_with_only_cross_reports_signed_diff() {
        let mut state = ControlState::new(ControlConfig { block_size: 1, ..Default::default() });
        let block = vec![cross(2000, 0)];
        state.observe(&block);
        assert_eq!(state.diff_withsign, BigInt::from(-2000));
        assert_eq!(state.diff, BigInt::from(2000));
    }

    #[test]
    fn balance_invariant_holds_across_blocks() {
        let mut state = ControlState::new(ControlConfig { block_size: 10, ..Default::default() });
        state.tax = BigInt::from(10);
        state.subsidy = BigInt::from(5);
        state.observe(&[intra(100, 0), cross(40, 1)]);
        let balance_after_first = state.balance.clone();
        state.observe(&[intra(100, 2)]);
        assert_eq!(state.balance, &balance_after_first + &state.delta_balance);
    }

    #[test]
    fn observe_on_empty_block_is_a_no_op_on_cumulative_fields() {
        let mut state = ControlState::new(ControlConfig { block_size: 10, ..Default::default() });
        state.tax = BigInt::from(10);
        state.total_tax = BigInt::from(999);
        let balance_before = state.balance.clone();
        state.observe(&[]);
        assert_eq!(state.total_tax, BigInt::from(999));
        assert_eq!(state.balance, balance_before);
        assert_eq!(state.diff, BigInt::zero());
        assert_eq!(state.diff_withsign, BigInt::zero());
    }
}
