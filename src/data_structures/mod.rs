pub mod counter;
pub mod priority_queue;

pub use counter::{OperationCounter, OperationCounts};
pub use priority_queue::{FrontierView, LazyBinaryHeap, LinearScanQueue, PriorityStructure};
