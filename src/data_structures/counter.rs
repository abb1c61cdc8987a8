use serde::{Deserialize, Serialize};

/// Immutable snapshot of the four operation counters of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    pub comparisons: u64,
    pub extractions: u64,
    pub relaxation_attempts: u64,
    pub relaxation_successes: u64,
}

impl OperationCounts {
    /// Sum of all four counters
    pub fn total(&self) -> u64 {
        self.comparisons + self.extractions + self.relaxation_attempts + self.relaxation_successes
    }
}

/// Passive instrumentation incremented by the engine and priority structures
#[derive(Debug, Clone, Default)]
pub struct OperationCounter {
    counts: OperationCounts,
}

impl OperationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_comparison(&mut self) {
        self.counts.comparisons += 1;
    }

    pub fn record_extraction(&mut self) {
        self.counts.extractions += 1;
    }

    pub fn record_relaxation_attempt(&mut self) {
        self.counts.relaxation_attempts += 1;
    }

    pub fn record_relaxation_success(&mut self) {
        self.counts.relaxation_successes += 1;
    }

    /// Zeroes every counter
    pub fn reset(&mut self) {
        self.counts = OperationCounts::default();
    }

    pub fn snapshot(&self) -> OperationCounts {
        self.counts
    }
}
