use num_traits::{Signed, Zero};
use shardsim_types::BigInt;

use crate::state::ControlState;

/// Fixed-point scale for `factor(dev, ε)`: the factor itself must be
/// computed in floating point (it clamps to `[factor_min, factor_max]`
/// against a ratio of arbitrary-precision integers), but multiplying it
/// straight into an `f64 * BigInt` would truncate precision for any large
/// deviation. Scaling the factor into an integer numerator over this
/// denominator keeps the whole `delta_base * factor` product exact
/// integer arithmetic.
const FACTOR_SCALE: i64 = 1_000_000_000;

/// Extension point mirroring the original's numbered `UpdateTaxAndSubsidy_v*`
/// variants, each a distinct control law over the same `ControlState`.
/// Only the final, prescribed law is implemented here; see `DESIGN.md` for
/// why the earlier variants aren't reproduced.
pub trait TaxAdjuster: Send + Sync {
    fn adjust(&self, state: &mut ControlState);
}

/// The proportional dead-band law: a latency stage that takes priority
/// whenever `|diff_withsign|` exceeds `eps_delay`, falling back to a
/// fiscal-balance stage with three dead-band (no-op) zones otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProportionalDeadBandAdjuster;

/// `factor(deviation, epsilon)`, scaled by `FACTOR_SCALE` and returned as
/// an integer numerator. `epsilon == 0` clamps to `1.0` exactly as the
/// unscaled computation does, regardless of `factor_min`.
fn factor_numerator(deviation: &BigInt, epsilon: &BigInt, factor_min: f64, factor_max: f64) -> i64 {
    if epsilon.is_zero() {
        return FACTOR_SCALE;
    }
    let abs_dev = deviation.abs();
    let ratio = abs_dev.to_f64_lossy() / epsilon.to_f64_lossy();
    let clamped = ratio.clamp(factor_min, factor_max);
    (clamped * FACTOR_SCALE as f64).round() as i64
}

/// `delta_base * factor(deviation, epsilon)`, computed as pure `BigInt`
/// arithmetic via the scaled numerator so `delta_base` never loses
/// precision regardless of magnitude.
fn effective_step(
    delta_base: &BigInt,
    deviation: &BigInt,
    epsilon: &BigInt,
    factor_min: f64,
    factor_max: f64
) -> BigInt {
    let numerator = factor_numerator(deviation, epsilon, factor_min, factor_max);
    (delta_base * numerator) / FACTOR_SCALE
}

trait ToF64Lossy {
    fn to_f64_lossy(&self) -> f64;
}

impl ToF64Lossy for BigInt {
    fn to_f64_lossy(&self) -> f64 {
        use num_traits::ToPrimitive;
        self.to_f64().unwrap_or(f64::MAX)
    }
}

impl TaxAdjuster for ProportionalDeadBandAdjuster {
    fn adjust(&self, state: &mut ControlState) {
        let eps_delay = state.config.eps_delay.clone();
        let eps_balance = state.config.eps_balance.clone();
        let eps_delta_balance = state.config.eps_delta_balance.clone();
        let delta_base = state.config.delta_base.clone();
        let shard_count = state.config.shard_count;
        let factor_min = state.config.factor_min;
        let factor_max = state.config.factor_max;

        let delay_balanced = state.diff_withsign.abs() <= eps_delay;

        if !delay_balanced {
            let effective =
                effective_step(&delta_base, &state.diff_withsign, &eps_delay, factor_min, factor_max);
            if state.diff_withsign.is_positive() {
                // ctx lagging behind itx: raise tax, raise subsidy.
                state.tax += &effective * (shard_count as i64 - 1);
                state.subsidy += &effective;
            } else {
                // itx lagging behind ctx: lower tax, lower subsidy.
                state.tax -= &effective * (shard_count as i64 - 1);
                state.subsidy -= &effective;
            }
            return;
        }

        let balance_plus_delta = &state.balance + &state.delta_balance;
        let eps_sum = &eps_balance + &eps_delta_balance;
        let effective =
            effective_step(&delta_base, &balance_plus_delta, &eps_sum, factor_min, factor_max);

        let zero = BigInt::zero();

        if state.balance <= zero {
            if state.delta_balance <= zero {
                state.tax += &effective;
                state.subsidy -= &effective;
            } else if state.balance < -&eps_balance {
                state.tax += &effective;
                state.subsidy -= &effective;
            } else if state.delta_balance <= eps_delta_balance {
                // dead band: tax and subsidy unchanged.
            } else {
                state.tax -= &effective;
                state.subsidy += &effective;
            }
        } else {
            if state.delta_balance > zero {
                state.tax -= &effective;
                state.subsidy += &effective;
            } else if state.balance > eps_balance {
                state.tax -= &effective;
                state.subsidy += &effective;
            } else if state.delta_balance > -&eps_delta_balance {
                // dead band: tax and subsidy unchanged.
            } else {
                state.tax += &effective;
                state.subsidy -= &effective;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ControlConfig;

    use super::*;

    fn state_with(config: ControlConfig) -> ControlState {
        ControlState::new(config)
    }

    #[test]
    fn s4_latency_gap_triggers_adjustment_and_skips_fiscal_stage() {
        let config = ControlConfig {
            shard_count: 4,
            eps_delay: BigInt::from(100),
            delta_base: BigInt::from(10),
            factor_min: 1.0,
            factor_max: 1.0,
            ..Default::default()
        };
        let mut state = state_with(config);
        // f_itx_min = 1000, f_ctx_min = 2000 -> diff_withsign = +1000.
        state.diff_withsign = BigInt::from(1000);
        ProportionalDeadBandAdjuster.adjust(&mut state);
        assert_eq!(state.tax, BigInt::from(30));
        assert_eq!(state.subsidy, BigInt::from(10));
    }

    #[test]
    fn negative_diff_lowers_tax_and_subsidy() {
        let config = ControlConfig { eps_delay: BigInt::from(100), ..Default::default() };
        let mut state = state_with(config);
        state.diff_withsign = BigInt::from(-500);
        ProportionalDeadBandAdjuster.adjust(&mut state);
        assert!(state.tax.is_negative());
        assert!(state.subsidy.is_negative());
    }

    #[test]
    fn s5_yellow_dead_band_is_a_no_op() {
        let config = ControlConfig {
            eps_delay: BigInt::from(100),
            eps_balance: BigInt::from(1000),
            eps_delta_balance: BigInt::from(1000),
            ..Default::default()
        };
        let mut state = state_with(config);
        state.diff_withsign = BigInt::zero();
        state.balance = BigInt::from(-500);
        state.delta_balance = BigInt::from(10);
        let tax_before = state.tax.clone();
        let subsidy_before = state.subsidy.clone();
        ProportionalDeadBandAdjuster.adjust(&mut state);
        assert_eq!(state.tax, tax_before);
        assert_eq!(state.subsidy, subsidy_before);
    }

    #[test]
    fn deficit_outside_band_raises_tax_and_lowers_subsidy() {
        let config = ControlConfig {
            eps_delay: BigInt::from(100),
            eps_balance: BigInt::from(1000),
            eps_delta_balance: BigInt::from(1000),
            ..Default::default()
        };
        let mut state = state_with(config);
        state.diff_withsign = BigInt::zero();
        state.balance = BigInt::from(-5000);
        state.delta_balance = BigInt::from(10);
        let tax_before = state.tax.clone();
        let subsidy_before = state.subsidy.clone();
        ProportionalDeadBandAdjuster.adjust(&mut state);
        assert!(state.tax > tax_before);
        assert!(state.subsidy < subsidy_before);
    }

    #[test]
    fn surplus_outside_band_lowers_tax_and_raises_subsidy() {
        let config = ControlConfig {
            eps_delay: BigInt::from(100),
            eps_balance: BigInt::from(1000),
            eps_delta_balance: BigInt::from(1000),
            ..Default::default()
        };
        let mut state = state_with(config);
        state.diff_withsign = BigInt::zero();
        state.balance = BigInt::from(5000);
        state.delta_balance = BigInt::from(-10);
        let tax_before = state.tax.clone();
        let subsidy_before = state.subsidy.clone();
        ProportionalDeadBandAdjuster.adjust(&mut state);
        assert!(state.tax < tax_before);
        assert!(state.subsidy > subsidy_before);
    }

    #[test]
    fn factor_clamps_to_min_and_max() {
        assert_eq!(
            factor_numerator(&BigInt::from(1), &BigInt::from(1000), 1.0, 8.0),
            FACTOR_SCALE
        );
        assert_eq!(
            factor_numerator(&BigInt::from(100_000), &BigInt::from(1000), 1.0, 8.0),
            8 * FACTOR_SCALE
        );
    }

    #[test]
    fn factor_zero_epsilon_clamps_to_one() {
        assert_eq!(
            factor_numerator(&BigInt::from(500), &BigInt::zero(), 1.0, 8.0),
            FACTOR_SCALE
        );
    }
}
