use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scheduling priority of a pipeline task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Time-sensitive sampling
    High,
    /// Transform and control work
    Normal,
    Low,
}

impl Priority {
    /// Get numeric value for comparison (higher = more urgent)
    pub fn value(&self) -> u8 {
        match self {
            Priority::High => 2,
            Priority::Normal => 1,
            Priority::Low => 0,
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}
