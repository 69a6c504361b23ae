use super::error::SearchError;
use super::state::SearchState;
use crate::model::EdgeId;

#[derive(Debug, Clone, Copy)]
struct Cell {
    edge_id: EdgeId,
    arrival_time: i64,
    cost: f32,
    priority: f32,
    predecessor_edge_id: i64,
    held: bool,
    generation: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            edge_id: EdgeId(0),
            arrival_time: 0,
            cost: 0.0,
            priority: 0.0,
            predecessor_edge_id: crate::model::NO_PREDECESSOR,
            held: false,
            generation: 0,
        }
    }
}

/// Opaque handle returned by [`PooledPriorityQueue::extract_min`]; must be
/// passed back to [`PooledPriorityQueue::recycle`] exactly once. Carries a
/// generation tag so a stale handle from a cell [`PooledPriorityQueue::clear`]
/// already reclaimed is rejected rather than silently corrupting the pool.
#[derive(Debug, Clone, Copy)]
pub struct StateToken {
    cell_idx: u32,
    generation: u32,
}

/// A binary min-heap over [`SearchState`] backed by an object pool, a
/// position map for O(log n) decrease-key, and usage accounting.
/// Grounded on the arenas-and-indices idiom spec.md §9 prescribes in place
/// of the teacher's `priority_queue`-crate wrapper: cross-entity references
/// here (heap slot → pool cell, edge id → heap slot) are plain indices into
/// flat `Vec`s, with no pointer graph.
///
/// Ordering: lower `priority` first (ties broken on lower `arrival_time`).
/// `priority` carries `g` for Dijkstra or `g + h` for A*; `cost` always
/// holds `g` alone so path costs stay exact regardless of heuristic.
#[derive(Debug)]
pub struct PooledPriorityQueue {
    capacity: usize,
    cells: Vec<Cell>,       // index 0 unused; 1..=capacity are pool cells
    free: Vec<u32>,         // stack of free cell indices
    heap: Vec<u32>,         // index 0 unused; heap[1..=size] are cell indices
    size: usize,
    positions: Vec<u32>,    // indexed by edge_id; 0 = absent, else heap slot
    peak_active_states: usize,
    pool_leak_count: u64,
}

impl PooledPriorityQueue {
    pub fn new(capacity: usize, edge_count: usize) -> Self {
        PooledPriorityQueue {
            capacity,
            cells: vec![Cell::default(); capacity + 1],
            free: (1..=capacity as u32).rev().collect(),
            heap: vec![0u32; capacity + 1],
            size: 0,
            positions: vec![0u32; edge_count],
            peak_active_states: 0,
            pool_leak_count: 0,
        }
    }

    pub fn active_states(&self) -> usize {
        self.capacity - self.free.len()
    }

    pub fn peak_active_states(&self) -> usize {
        self.peak_active_states
    }

    pub fn pool_utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.active_states() as f64 / self.capacity as f64
        }
    }

    pub fn pool_leak_count(&self) -> u64 {
        self.pool_leak_count
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `insert(edge_id, arrival_time, cost, priority, predecessor)`: if the
    /// edge is already queued, overwrites in place only when
    /// `(priority, arrival_time)` is strictly better; otherwise acquires a
    /// fresh cell from the pool and swims it into place.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        edge_id: EdgeId,
        arrival_time: i64,
        cost: f32,
        priority: f32,
        predecessor_edge_id: i64,
    ) -> Result<(), SearchError> {
        let existing_slot = self.positions[edge_id.index()];
        if existing_slot != 0 {
            let cell_idx = self.heap[existing_slot as usize] as usize;
            let existing = &self.cells[cell_idx];
            let better = (priority, arrival_time) < (existing.priority, existing.arrival_time);
            if better {
                self.cells[cell_idx].cost = cost;
                self.cells[cell_idx].priority = priority;
                self.cells[cell_idx].arrival_time = arrival_time;
                self.cells[cell_idx].predecessor_edge_id = predecessor_edge_id;
                self.swim(existing_slot as usize);
            }
            return Ok(());
        }

        if self.size >= self.capacity {
            return Err(SearchError::HeapFull {
                capacity: self.capacity,
            });
        }
        let cell_idx = self.free.pop().ok_or(SearchError::PoolExhausted {
            capacity: self.capacity,
        })?;
        self.cells[cell_idx as usize] = Cell {
            edge_id,
            arrival_time,
            cost,
            priority,
            predecessor_edge_id,
            held: false,
            generation: self.cells[cell_idx as usize].generation,
        };

        self.size += 1;
        self.heap[self.size] = cell_idx;
        self.positions[edge_id.index()] = self.size as u32;
        self.peak_active_states = self.peak_active_states.max(self.active_states());
        self.swim(self.size);
        Ok(())
    }

    /// pops the root, moves the returned state into the caller's hands.
    /// The caller must [`Self::recycle`] the returned token exactly once.
    pub fn extract_min(&mut self) -> Option<(SearchState, StateToken)> {
        if self.size == 0 {
            return None;
        }
        let root_idx = self.heap[1];
        let last_idx = self.heap[self.size];
        self.heap[1] = last_idx;
        self.positions[self.cells[root_idx as usize].edge_id.index()] = 0;
        self.size -= 1;
        if self.size >= 1 {
            self.positions[self.cells[last_idx as usize].edge_id.index()] = 1;
            self.sink(1);
        }

        let cell = &mut self.cells[root_idx as usize];
        cell.held = true;
        let state = SearchState {
            edge_id: cell.edge_id,
            arrival_time: cell.arrival_time,
            cost: cell.cost,
            predecessor_edge_id: cell.predecessor_edge_id,
        };
        let token = StateToken {
            cell_idx: root_idx,
            generation: cell.generation,
        };
        Some((state, token))
    }

    /// returns a previously extracted state's cell to the pool. Detects
    /// double-recycle and recycle-with-no-active states and fails loudly
    /// rather than silently corrupting pool accounting.
    pub fn recycle(&mut self, token: StateToken) -> Result<(), SearchError> {
        let cell = &mut self.cells[token.cell_idx as usize];
        if cell.generation != token.generation || !cell.held {
            return Err(if self.active_states() == 0 {
                SearchError::RecycleWithNoActive
            } else {
                SearchError::DoubleRecycle
            });
        }
        cell.held = false;
        cell.generation = cell.generation.wrapping_add(1);
        self.free.push(token.cell_idx);
        Ok(())
    }

    /// resets the queue: all heap/held cells return to the pool (bumping
    /// their generation so stale tokens are rejected), and accounting is
    /// reset. Leaked (held-but-not-recycled) states are recovered with a
    /// warning rather than aborting the session, per spec.md §9.
    pub fn clear(&mut self) {
        let mut leaked = 0u64;
        for idx in 1..=self.capacity as u32 {
            let cell = &mut self.cells[idx as usize];
            if cell.held {
                leaked += 1;
                cell.held = false;
            }
        }
        for slot in self.heap[1..=self.size].iter() {
            self.positions[self.cells[*slot as usize].edge_id.index()] = 0;
        }
        self.size = 0;
        self.free.clear();
        for idx in (1..=self.capacity as u32).rev() {
            self.cells[idx as usize].generation = self.cells[idx as usize].generation.wrapping_add(1);
            self.free.push(idx);
        }
        if leaked > 0 {
            self.pool_leak_count += leaked;
            log::warn!(
                "priority queue clear() recovered {leaked} leaked state(s); pool replenished"
            );
            debug_assert!(
                leaked == 0,
                "leaked {leaked} priority queue state(s) not recycled before clear()"
            );
        }
    }

    fn swim(&mut self, mut slot: usize) {
        while slot > 1 {
            let parent = slot / 2;
            if self.heap_key(parent) <= self.heap_key(slot) {
                break;
            }
            self.swap_slots(parent, slot);
            slot = parent;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        loop {
            let left = slot * 2;
            let right = left + 1;
            let mut smallest = slot;
            if left <= self.size && self.heap_key(left) < self.heap_key(smallest) {
                smallest = left;
            }
            if right <= self.size && self.heap_key(right) < self.heap_key(smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap_slots(slot, smallest);
            slot = smallest;
        }
    }

    fn heap_key(&self, slot: usize) -> (ordered_float::OrderedFloat<f32>, i64) {
        let cell = &self.cells[self.heap[slot] as usize];
        (ordered_float::OrderedFloat(cell.priority), cell.arrival_time)
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let edge_a = self.cells[self.heap[a] as usize].edge_id;
        let edge_b = self.cells[self.heap[b] as usize].edge_id;
        self.positions[edge_a.index()] = a as u32;
        self.positions[edge_b.index()] = b as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut q = PooledPriorityQueue::new(8, 8);
        q.insert(EdgeId(0), 10, 5.0, 5.0, -1).unwrap();
        q.insert(EdgeId(1), 10, 1.0, 1.0, -1).unwrap();
        q.insert(EdgeId(2), 10, 3.0, 3.0, -1).unwrap();

        let (s1, t1) = q.extract_min().unwrap();
        assert_eq!(s1.edge_id, EdgeId(1));
        q.recycle(t1).unwrap();
        let (s2, t2) = q.extract_min().unwrap();
        assert_eq!(s2.edge_id, EdgeId(2));
        q.recycle(t2).unwrap();
        let (s3, t3) = q.extract_min().unwrap();
        assert_eq!(s3.edge_id, EdgeId(0));
        q.recycle(t3).unwrap();
        assert!(q.extract_min().is_none());
    }

    #[test]
    fn decrease_key_overwrites_only_when_strictly_better() {
        let mut q = PooledPriorityQueue::new(4, 4);
        q.insert(EdgeId(0), 10, 5.0, 5.0, -1).unwrap();
        q.insert(EdgeId(0), 10, 2.0, 2.0, -1).unwrap(); // better, should replace
        q.insert(EdgeId(0), 10, 9.0, 9.0, -1).unwrap(); // worse, ignored
        let (s, t) = q.extract_min().unwrap();
        assert_eq!(s.cost, 2.0);
        q.recycle(t).unwrap();
    }

    #[test]
    fn pool_exhaustion_is_reported() {
        let mut q = PooledPriorityQueue::new(1, 4);
        q.insert(EdgeId(0), 0, 1.0, 1.0, -1).unwrap();
        let err = q.insert(EdgeId(1), 0, 1.0, 1.0, -1).unwrap_err();
        assert!(matches!(err, SearchError::HeapFull { .. }));
    }

    #[test]
    fn double_recycle_is_detected() {
        let mut q = PooledPriorityQueue::new(4, 4);
        q.insert(EdgeId(0), 0, 1.0, 1.0, -1).unwrap();
        let (_, t) = q.extract_min().unwrap();
        q.recycle(t).unwrap();
        let err = q.recycle(t).unwrap_err();
        assert!(matches!(
            err,
            SearchError::DoubleRecycle | SearchError::RecycleWithNoActive
        ));
    }

    #[test]
    fn clear_recovers_leaked_state_and_resets_accounting() {
        let mut q = PooledPriorityQueue::new(4, 4);
        q.insert(EdgeId(0), 0, 1.0, 1.0, -1).unwrap();
        let (_, _leaked_token) = q.extract_min().unwrap(); // never recycled
        q.clear();
        assert_eq!(q.active_states(), 0);
        assert_eq!(q.pool_leak_count(), 1);
        // queue is fully usable afterwards
        q.insert(EdgeId(1), 0, 1.0, 1.0, -1).unwrap();
        assert_eq!(q.active_states(), 1);
    }

    #[test]
    fn tie_breaks_on_arrival_time() {
        let mut q = PooledPriorityQueue::new(4, 4);
        q.insert(EdgeId(0), 20, 1.0, 1.0, -1).unwrap();
        q.insert(EdgeId(1), 10, 1.0, 1.0, -1).unwrap();
        let (s, t) = q.extract_min().unwrap();
        assert_eq!(s.edge_id, EdgeId(1));
        q.recycle(t).unwrap();
    }
}
