use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::priority_queue::PooledPriorityQueue;
use super::visited::VisitedSet;
use crate::model::NO_PREDECESSOR;

/// Per-query scratch state: the priority queue, the visited set, and the
/// parallel predecessor/arrival/cost arrays used for reconstruction. Owned
/// independently of [`super::core::SearchCore`] so a caller can pool and
/// reuse sessions across many queries against the same static graph,
/// mirroring the teacher's `SearchInstance` reuse pattern.
#[derive(Debug)]
pub struct SearchSession {
    pub(super) queue: PooledPriorityQueue,
    pub(super) visited: VisitedSet,
    pub(super) predecessor: Vec<i64>,
    pub(super) arrival: Vec<i64>,
    pub(super) cost: Vec<f32>,
    cancel: Arc<AtomicBool>,
}

impl SearchSession {
    pub fn new(edge_count: usize, queue_capacity: usize) -> Self {
        SearchSession {
            queue: PooledPriorityQueue::new(queue_capacity, edge_count),
            visited: VisitedSet::new(edge_count),
            predecessor: vec![NO_PREDECESSOR; edge_count],
            arrival: vec![0; edge_count],
            cost: vec![f32::INFINITY; edge_count],
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// clears per-query scratch state so the session can be reused for a
    /// fresh query over the same graph without reallocating.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.visited.clear();
        self.predecessor.iter_mut().for_each(|p| *p = NO_PREDECESSOR);
        self.arrival.iter_mut().for_each(|a| *a = 0);
        self.cost.iter_mut().for_each(|c| *c = f32::INFINITY);
        self.cancel.store(false, Ordering::Relaxed);
    }

    /// a cloneable handle another thread can use to request cancellation.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub fn pool_leak_count(&self) -> u64 {
        self.queue.pool_leak_count()
    }

    pub fn pool_utilization(&self) -> f64 {
        self.queue.pool_utilization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_initial_scratch_state() {
        let mut session = SearchSession::new(8, 8);
        session.predecessor[3] = 5;
        session.cost[3] = 1.0;
        session.reset();
        assert_eq!(session.predecessor[3], NO_PREDECESSOR);
        assert_eq!(session.cost[3], f32::INFINITY);
        assert!(!session.is_cancelled());
    }

    #[test]
    fn cancel_handle_is_shared_and_observable() {
        let session = SearchSession::new(4, 4);
        let handle = session.cancel_handle();
        handle.store(true, Ordering::Relaxed);
        assert!(session.is_cancelled());
    }
}
