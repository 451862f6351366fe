use super::MetricsCollector;

pub struct PipelineMonitor {
    collector: MetricsCollector,
}

impl PipelineMonitor {
    pub fn new(collector: MetricsCollector) -> Self {
        Self { collector }
    }

    pub fn generate_report(&self) -> String {
        let snapshot = self.collector.snapshot();

        if snapshot.is_empty() {
            return "No tasks registered".to_string();
        }

        let mut report = String::from("=== Pipeline Metrics ===\n");

        for (task_id, metrics) in snapshot.iter() {
            report.push_str(&format!(
                "\n[{}]\n  Ticks: {}\n  Items: {}\n  Suspensions: {}\n  Resets: {}\n",
                task_id, metrics.ticks, metrics.items, metrics.suspensions, metrics.resets
            ));
        }

        report
    }

    pub fn collector(&self) -> &MetricsCollector {
        &self.collector
    }
}
