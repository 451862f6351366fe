use crate::engine::SuspendReason;

/// Result of one period's unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One item was moved through the task
    Moved,

    /// The task must park itself until re-armed
    Park(SuspendReason),

    /// The task's peer is gone; the loop should end
    Stop,
}

/// A long-lived task driven once per period by a `TaskRunner`.
///
/// Implementations only hold their own counters; suspension and resumption
/// are handled by the runner.
pub trait PeriodicTask: Send + 'static {
    fn name(&self) -> &'static str;

    fn tick(&mut self) -> Tick;

    /// Called when a lifecycle request parks the task
    fn on_suspend(&mut self) {}

    /// Re-enter the initialization path (position counter back to 0)
    fn rearm(&mut self);

    /// Current write position (Sampler counter or Transformer cursor)
    fn position(&self) -> usize;
}
