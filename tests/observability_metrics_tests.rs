use sampletab::observability::{MetricsCollector, PipelineMonitor, TaskMetrics};
use std::sync::Arc;

#[test]
fn test_metrics_creation() {
    let metrics = TaskMetrics::new("sampler");
    assert_eq!(metrics.task_id(), "sampler");
    assert_eq!(metrics.ticks(), 0);
    assert_eq!(metrics.items(), 0);
    assert_eq!(metrics.suspensions(), 0);
    assert_eq!(metrics.resets(), 0);
}

#[test]
fn test_metrics_increment() {
    let metrics = Arc::new(TaskMetrics::new("transformer"));

    metrics.record_tick();
    metrics.record_tick();
    metrics.record_item();
    metrics.record_suspension();
    metrics.record_reset();

    assert_eq!(metrics.ticks(), 2);
    assert_eq!(metrics.items(), 1);
    assert_eq!(metrics.suspensions(), 1);
    assert_eq!(metrics.resets(), 1);
}

#[test]
fn test_collector_snapshot() {
    let mut collector = MetricsCollector::new();
    let sampler = collector.track("sampler");
    sampler.record_item();

    let snapshot = collector.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot["sampler"].items, 1);
    assert!(collector.get_task_metrics("missing").is_none());
}

#[test]
fn test_report() {
    let empty = PipelineMonitor::new(MetricsCollector::new());
    assert_eq!(empty.generate_report(), "No tasks registered");

    let mut collector = MetricsCollector::new();
    collector.track("sampler").record_suspension();
    let report = PipelineMonitor::new(collector).generate_report();

    assert!(report.contains("[sampler]"));
    assert!(report.contains("Suspensions: 1"));
}
