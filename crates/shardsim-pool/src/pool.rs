use std::{collections::VecDeque, sync::Arc};

use chrono::Utc;
use parking_lot::Mutex;
use shardsim_types::{ControlSnapshot, Transaction};

use crate::packing;

/// The mutable, ordered sequence of not-yet-packed transactions (spec §4.3).
///
/// A single `parking_lot::Mutex` guards the whole queue; every operation
/// takes the lock for its entire body and no operation calls another while
/// holding it, matching the `Arc<Mutex<...>>`-per-pool shape the teacher
/// uses for its own order storage.
#[derive(Clone)]
pub struct PendingPool {
    queue: Arc<Mutex<VecDeque<Transaction>>>
}

impl Default for PendingPool {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingPool {
    pub fn new() -> Self {
        Self { queue: Arc::new(Mutex::new(VecDeque::new())) }
    }

    /// Appends a single transaction, stamping the insertion timestamp if it
    /// wasn't set at construction (spec §4.3: "Insertion timestamps default
    /// to wall clock if unset at insert time"; our `Transaction` always
    /// carries a timestamp, so this only re-stamps the Unix-epoch sentinel
    /// some ingestion paths may pass through).
    pub fn add(&self, mut tx: Transaction) {
        if tx.timestamp.timestamp() == 0 {
            tx.timestamp = Utc::now();
        }
        self.queue.lock().push_back(tx);
    }

    /// Appends a batch, preserving the batch's internal order at the tail.
    pub fn add_batch(&self, txs: impl IntoIterator<Item = Transaction>) {
        let mut guard = self.queue.lock();
        for mut tx in txs {
            if tx.timestamp.timestamp() == 0 {
                tx.timestamp = Utc::now();
            }
            guard.push_back(tx);
        }
    }

    /// Prepends a batch ahead of everything already queued, preserving the
    /// batch's internal order (spec §4.3).
    pub fn add_batch_front(&self, txs: impl IntoIterator<Item = Transaction>) {
        let mut guard = self.queue.lock();
        let mut front: VecDeque<Transaction> = txs.into_iter().collect();
        front.extend(guard.drain(..));
        *guard = front;
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packs the next block: scores, filters, sorts, and removes up to
    /// `max` transactions, leaving survivors in the queue in their original
    /// relative order (spec §4.4).
    pub fn pack(&self, max: usize, snapshot: &ControlSnapshot) -> Vec<Transaction> {
        let mut guard = self.queue.lock();
        packing::pack(&mut guard, max, snapshot)
    }
}
