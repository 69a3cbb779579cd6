//! The packing selector: effective-fee scoring, the profitability filter,
//! the stable top-K selection, and the carry-over of rejected transactions.
//!
//! These are pure functions over an owned `Vec`/`VecDeque` so they can be
//! unit-tested without a pool or a lock. [`crate::pool::PendingPool::pack`]
//! is the only caller in production.

use std::collections::VecDeque;

use num_traits::Signed;
use shardsim_types::{BigInt, ControlSnapshot, Transaction};

/// The effective fee a transaction would contribute if packed right now.
///
/// - intra-shard: `gas_price * gas_used - tax`
/// - cross-shard: `(gas_price * gas_used) / 2 + subsidy` (integer division)
pub fn effective_fee(tx: &Transaction, snapshot: &ControlSnapshot) -> BigInt {
    let raw = tx.raw_fee();
    if tx.is_cross_shard {
        (raw / 2) + &snapshot.subsidy
    } else {
        raw - &snapshot.tax
    }
}

struct Scored {
    idx: usize,
    tx:  Transaction,
    eff: BigInt
}

/// Packs up to `max` transactions out of `queue`, in place.
///
/// Returns the emitted block, ordered by descending effective fee (ties
/// broken by original queue order, the partition below preserves it, and
/// `sort_by` is a stable sort). `queue` is left holding every survivor
/// (carried-over unprofitable transactions, plus any profitable ones beyond
/// `max`) in their original relative order.
pub fn pack(queue: &mut VecDeque<Transaction>, max: usize, snapshot: &ControlSnapshot) -> Vec<Transaction> {
    let drained: Vec<Transaction> = queue.drain(..).collect();

    let scored: Vec<Scored> = drained
        .into_iter()
        .enumerate()
        .map(|(idx, tx)| {
            let eff = effective_fee(&tx, snapshot);
            Scored { idx, tx, eff }
        })
        .collect();

    let (mut candidates, carry_over): (Vec<Scored>, Vec<Scored>) =
        scored.into_iter().partition(|s| !s.eff.is_negative());

    // Stable sort: ties keep the pre-sort (original queue) relative order.
    candidates.sort_by(|a, b| b.eff.cmp(&a.eff));

    let take = max.min(candidates.len());
    let leftover_candidates = candidates.split_off(take);

    let mut survivors = leftover_candidates;
    survivors.extend(carry_over);
    survivors.sort_by_key(|s| s.idx);
    queue.extend(survivors.into_iter().map(|s| s.tx));

    candidates.into_iter().map(|s| s.tx).collect()
}
