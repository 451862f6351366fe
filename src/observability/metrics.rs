use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one pipeline task, updated from the task itself
pub struct TaskMetrics {
    task_id: String,
    ticks: AtomicU64,
    items: AtomicU64,
    suspensions: AtomicU64,
    resets: AtomicU64,
}

impl TaskMetrics {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ticks: AtomicU64::new(0),
            items: AtomicU64::new(0),
            suspensions: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Samples sent, values transformed or commands dispatched
    pub fn items(&self) -> u64 {
        self.items.load(Ordering::Relaxed)
    }

    pub fn suspensions(&self) -> u64 {
        self.suspensions.load(Ordering::Relaxed)
    }

    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_item(&self) {
        self.items.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suspension(&self) {
        self.suspensions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }
}
