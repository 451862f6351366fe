use super::TaskMetrics;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub task_id: String,
    pub ticks: u64,
    pub items: u64,
    pub suspensions: u64,
    pub resets: u64,
}

#[derive(Clone, Default)]
pub struct MetricsCollector {
    metrics: BTreeMap<String, Arc<TaskMetrics>>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task_id: impl Into<String>, metrics: Arc<TaskMetrics>) {
        self.metrics.insert(task_id.into(), metrics);
    }

    /// Register fresh counters for `task_id` and hand them back
    pub fn track(&mut self, task_id: &str) -> Arc<TaskMetrics> {
        let metrics = Arc::new(TaskMetrics::new(task_id));
        self.register(task_id, metrics.clone());
        metrics
    }

    pub fn snapshot(&self) -> BTreeMap<String, MetricsSnapshot> {
        self.metrics
            .iter()
            .map(|(id, metrics)| {
                (
                    id.clone(),
                    MetricsSnapshot {
                        task_id: metrics.task_id().to_string(),
                        ticks: metrics.ticks(),
                        items: metrics.items(),
                        suspensions: metrics.suspensions(),
                        resets: metrics.resets(),
                    },
                )
            })
            .collect()
    }

    pub fn get_task_metrics(&self, task_id: &str) -> Option<Arc<TaskMetrics>> {
        self.metrics.get(task_id).cloned()
    }
}
