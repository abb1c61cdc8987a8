use std::fmt::Debug;

use log::trace;

use crate::algorithm::dijkstra::Strategy;
use crate::data_structures::OperationCounter;
use crate::graph::Weight;

/// Read-only state of the running engine that a priority structure may consult
#[derive(Debug, Clone, Copy)]
pub struct FrontierView<'a> {
    /// `finalized[v]` is true once v's distance is settled
    pub finalized: &'a [bool],
    /// Tie-break rank of every node; lower rank wins on equal keys
    pub ranks: &'a [usize],
}

/// "Select the next closest unfinalized node" capability shared by both
/// Dijkstra variants
pub trait PriorityStructure<W>: Debug
where
    W: Weight,
{
    /// Strategy this structure implements
    const STRATEGY: Strategy;

    /// Creates an empty structure for a graph with `node_count` nodes
    fn new(node_count: usize) -> Self
    where
        Self: Sized;

    /// Returns true if no candidate remains
    fn is_empty(&self) -> bool;

    /// Number of entries currently held (stale ones included)
    fn len(&self) -> usize;

    /// Removes and returns the unfinalized node with the smallest key
    ///
    /// Returns `None` once every remaining candidate is finalized. A node
    /// is returned at most once, even if the caller has not finalized it yet.
    fn extract_min(
        &mut self,
        view: &FrontierView<'_>,
        ops: &mut OperationCounter,
    ) -> Option<(usize, W)>;

    /// Records that `node` is now reachable with distance `key`
    fn decrease_key_or_insert(
        &mut self,
        node: usize,
        key: W,
        view: &FrontierView<'_>,
        ops: &mut OperationCounter,
    );
}

/// Naive variant: a flat key array scanned in full on every extraction
#[derive(Debug, Clone)]
pub struct LinearScanQueue<W>
where
    W: Weight,
{
    /// Current key of every node, infinity until first inserted
    keys: Vec<W>,
    /// Nodes already returned by `extract_min`
    extracted: Vec<bool>,
    /// Nodes with a finite key that have not been extracted yet
    pending: usize,
}

impl<W> PriorityStructure<W> for LinearScanQueue<W>
where
    W: Weight,
{
    const STRATEGY: Strategy = Strategy::Naive;

    fn new(node_count: usize) -> Self {
        LinearScanQueue {
            keys: vec![W::infinity(); node_count],
            extracted: vec![false; node_count],
            pending: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.pending == 0
    }

    fn len(&self) -> usize {
        self.pending
    }

    fn extract_min(
        &mut self,
        view: &FrontierView<'_>,
        ops: &mut OperationCounter,
    ) -> Option<(usize, W)> {
        if self.pending == 0 {
            return None;
        }

        let mut best: Option<usize> = None;

        for (node, &key) in self.keys.iter().enumerate() {
            if view.finalized[node] || self.extracted[node] {
                continue;
            }
            match best {
                None => best = Some(node),
                Some(current) => {
                    ops.record_comparison();
                    let current_key = self.keys[current];
                    if key < current_key
                        || (key == current_key && view.ranks[node] < view.ranks[current])
                    {
                        best = Some(node);
                    }
                }
            }
        }

        let node = best?;
        let key = self.keys[node];
        if key.is_infinite() {
            return None;
        }

        self.extracted[node] = true;
        self.pending -= 1;
        ops.record_extraction();
        Some((node, key))
    }

    fn decrease_key_or_insert(
        &mut self,
        node: usize,
        key: W,
        _view: &FrontierView<'_>,
        _ops: &mut OperationCounter,
    ) {
        if self.extracted[node] {
            return;
        }
        if self.keys[node].is_infinite() {
            self.pending += 1;
        }
        self.keys[node] = key;
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry<W> {
    key: W,
    rank: usize,
    node: usize,
}

/// Heap variant: binary min-heap with lazy decrease-key
///
/// A decreased key is pushed as a new entry; the outdated entry stays in
/// the heap and is discarded when popped after its node was finalized.
/// Uses 0-indexed storage with parent = (i-1)/2, children = 2i+1, 2i+2.
#[derive(Debug, Clone)]
pub struct LazyBinaryHeap<W>
where
    W: Weight,
{
    entries: Vec<HeapEntry<W>>,
}

impl<W> LazyBinaryHeap<W>
where
    W: Weight,
{
    /// Orders by key, then by tie-break rank. Every call is one comparison.
    fn less(&self, a: usize, b: usize, ops: &mut OperationCounter) -> bool {
        ops.record_comparison();
        let (a, b) = (&self.entries[a], &self.entries[b]);
        a.key < b.key || (a.key == b.key && a.rank < b.rank)
    }

    fn sift_up(&mut self, mut index: usize, ops: &mut OperationCounter) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.less(index, parent, ops) {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut index: usize, ops: &mut OperationCounter) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.less(left, smallest, ops) {
                smallest = left;
            }
            if right < len && self.less(right, smallest, ops) {
                smallest = right;
            }

            if smallest == index {
                break;
            }

            self.entries.swap(index, smallest);
            index = smallest;
        }
    }

    /// Removes the root, restoring heap order
    fn pop(&mut self, ops: &mut OperationCounter) -> Option<HeapEntry<W>> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let root = self.entries.pop();
        if !self.entries.is_empty() {
            self.sift_down(0, ops);
        }
        root
    }
}

impl<W> PriorityStructure<W> for LazyBinaryHeap<W>
where
    W: Weight,
{
    const STRATEGY: Strategy = Strategy::Heap;

    fn new(node_count: usize) -> Self {
        LazyBinaryHeap {
            entries: Vec::with_capacity(node_count),
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn extract_min(
        &mut self,
        view: &FrontierView<'_>,
        ops: &mut OperationCounter,
    ) -> Option<(usize, W)> {
        while let Some(entry) = self.pop(ops) {
            if view.finalized[entry.node] {
                trace!("Discarding stale heap entry for node {} ({:?})", entry.node, entry.key);
                continue;
            }
            ops.record_extraction();
            return Some((entry.node, entry.key));
        }
        None
    }

    fn decrease_key_or_insert(
        &mut self,
        node: usize,
        key: W,
        view: &FrontierView<'_>,
        ops: &mut OperationCounter,
    ) {
        self.entries.push(HeapEntry {
            key,
            rank: view.ranks[node],
            node,
        });
        let last = self.entries.len() - 1;
        self.sift_up(last, ops);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_ranks(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_linear_scan_extracts_in_key_order() {
        let finalized = vec![false; 4];
        let ranks = identity_ranks(4);
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        let mut ops = OperationCounter::new();
        let mut queue: LinearScanQueue<f64> = LinearScanQueue::new(4);

        queue.decrease_key_or_insert(2, 7.0, &view, &mut ops);
        queue.decrease_key_or_insert(1, 3.0, &view, &mut ops);
        queue.decrease_key_or_insert(1, 2.0, &view, &mut ops);
        assert_eq!(queue.len(), 2);
        assert_eq!(ops.snapshot().comparisons, 0);

        assert_eq!(queue.extract_min(&view, &mut ops), Some((1, 2.0)));
        // All four slots are inspected, three of them against a running best
        assert_eq!(ops.snapshot().comparisons, 3);
        assert_eq!(ops.snapshot().extractions, 1);
    }

    #[test]
    fn test_linear_scan_skips_finalized_and_stops_on_infinity() {
        let mut finalized = vec![false; 3];
        let ranks = identity_ranks(3);
        let mut ops = OperationCounter::new();
        let mut queue: LinearScanQueue<f64> = LinearScanQueue::new(3);

        queue.decrease_key_or_insert(0, 0.0, &FrontierView { finalized: &finalized, ranks: &ranks }, &mut ops);
        let first = queue.extract_min(&FrontierView { finalized: &finalized, ranks: &ranks }, &mut ops);
        assert_eq!(first, Some((0, 0.0)));
        finalized[0] = true;

        assert!(queue.is_empty());
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        assert_eq!(queue.extract_min(&view, &mut ops), None);
        assert_eq!(ops.snapshot().extractions, 1);
    }

    #[test]
    fn test_both_structures_return_each_node_once() {
        let finalized = vec![false; 2];
        let ranks = identity_ranks(2);
        let view = FrontierView { finalized: &finalized, ranks: &ranks };

        let mut ops = OperationCounter::new();
        let mut queue: LinearScanQueue<f64> = LinearScanQueue::new(2);
        queue.decrease_key_or_insert(0, 0.0, &view, &mut ops);
        assert_eq!(queue.extract_min(&view, &mut ops), Some((0, 0.0)));
        assert!(queue.is_empty());
        // The caller has not finalized node 0 yet; it must not come back
        assert_eq!(queue.extract_min(&view, &mut ops), None);
        queue.decrease_key_or_insert(0, 0.0, &view, &mut ops);
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(&view, &mut ops), None);
        assert_eq!(ops.snapshot().extractions, 1);

        let mut ops = OperationCounter::new();
        let mut heap: LazyBinaryHeap<f64> = LazyBinaryHeap::new(2);
        heap.decrease_key_or_insert(0, 0.0, &view, &mut ops);
        assert_eq!(heap.extract_min(&view, &mut ops), Some((0, 0.0)));
        assert_eq!(heap.extract_min(&view, &mut ops), None);
        assert_eq!(ops.snapshot().extractions, 1);
    }

    #[test]
    fn test_linear_scan_skips_extracted_nodes_with_lower_keys() {
        let finalized = vec![false; 3];
        let ranks = identity_ranks(3);
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        let mut ops = OperationCounter::new();
        let mut queue: LinearScanQueue<f64> = LinearScanQueue::new(3);

        queue.decrease_key_or_insert(0, 1.0, &view, &mut ops);
        queue.decrease_key_or_insert(2, 5.0, &view, &mut ops);
        assert_eq!(queue.extract_min(&view, &mut ops), Some((0, 1.0)));
        assert_eq!(queue.extract_min(&view, &mut ops), Some((2, 5.0)));
        assert_eq!(queue.extract_min(&view, &mut ops), None);
    }

    #[test]
    fn test_linear_scan_breaks_ties_by_rank() {
        let finalized = vec![false; 3];
        // Node 2 has the lowest id
        let ranks = vec![2, 1, 0];
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        let mut ops = OperationCounter::new();
        let mut queue: LinearScanQueue<f64> = LinearScanQueue::new(3);

        for node in 0..3 {
            queue.decrease_key_or_insert(node, 5.0, &view, &mut ops);
        }
        assert_eq!(queue.extract_min(&view, &mut ops), Some((2, 5.0)));
    }

    #[test]
    fn test_heap_pops_in_order_and_counts_sift_comparisons() {
        let finalized = vec![false; 5];
        let ranks = identity_ranks(5);
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        let mut ops = OperationCounter::new();
        let mut heap: LazyBinaryHeap<f64> = LazyBinaryHeap::new(5);

        for (node, key) in [(0, 4.0), (1, 1.0), (2, 3.0), (3, 0.5), (4, 2.0)] {
            heap.decrease_key_or_insert(node, key, &view, &mut ops);
        }
        assert!(ops.snapshot().comparisons > 0);

        let mut popped = Vec::new();
        while let Some((node, _)) = heap.extract_min(&view, &mut ops) {
            popped.push(node);
        }
        assert_eq!(popped, vec![3, 1, 4, 2, 0]);
        assert_eq!(ops.snapshot().extractions, 5);
    }

    #[test]
    fn test_heap_discards_stale_entries_without_counting_extraction() {
        let mut finalized = vec![false; 2];
        let ranks = identity_ranks(2);
        let mut ops = OperationCounter::new();
        let mut heap: LazyBinaryHeap<f64> = LazyBinaryHeap::new(2);

        {
            let view = FrontierView { finalized: &finalized, ranks: &ranks };
            heap.decrease_key_or_insert(1, 9.0, &view, &mut ops);
            heap.decrease_key_or_insert(1, 4.0, &view, &mut ops);
            assert_eq!(heap.len(), 2);
            assert_eq!(heap.extract_min(&view, &mut ops), Some((1, 4.0)));
        }
        finalized[1] = true;

        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        assert_eq!(heap.extract_min(&view, &mut ops), None);
        assert!(heap.is_empty());
        assert_eq!(ops.snapshot().extractions, 1);
    }

    #[test]
    fn test_heap_breaks_ties_by_rank() {
        let finalized = vec![false; 3];
        let ranks = vec![1, 2, 0];
        let view = FrontierView { finalized: &finalized, ranks: &ranks };
        let mut ops = OperationCounter::new();
        let mut heap: LazyBinaryHeap<f64> = LazyBinaryHeap::new(3);

        for node in 0..3 {
            heap.decrease_key_or_insert(node, 1.0, &view, &mut ops);
        }
        assert_eq!(heap.extract_min(&view, &mut ops), Some((2, 1.0)));
        assert_eq!(heap.extract_min(&view, &mut ops), Some((0, 1.0)));
        assert_eq!(heap.extract_min(&view, &mut ops), Some((1, 1.0)));
    }
}
