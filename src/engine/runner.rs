use crate::core::{PeriodicTask, Tick};
use crate::engine::state::{SuspendReason, TaskState, TaskStatus};
use crate::error::{PipelineError, PipelineResult};
use crate::observability::TaskMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Pending lifecycle requests per task; the supervisor sends one at a time
const LIFECYCLE_MAILBOX: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Park the task regardless of its current state
    Suspend,
    /// Re-arm counters and the period timer, then make the task runnable
    Resume,
}

pub struct LifecycleRequest {
    pub command: LifecycleCommand,
    pub ack: oneshot::Sender<TaskStatus>,
}

/// Cheap handle for observing a running task and delivering lifecycle requests to it
#[derive(Clone)]
pub struct TaskHandle {
    name: &'static str,
    requests: mpsc::Sender<LifecycleRequest>,
    status: watch::Receiver<TaskStatus>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> TaskStatus {
        *self.status.borrow()
    }

    /// Wait until the published status satisfies `predicate`
    pub async fn wait_until<F>(&self, predicate: F) -> PipelineResult<TaskStatus>
    where
        F: FnMut(&TaskStatus) -> bool,
    {
        let mut status = self.status.clone();
        let current = status
            .wait_for(predicate)
            .await
            .map_err(|_| PipelineError::TaskStopped(self.name))?;
        Ok(*current)
    }

    /// Deliver a request and wait for the task to acknowledge it
    pub(crate) async fn request(&self, command: LifecycleCommand) -> PipelineResult<TaskStatus> {
        let (ack, done) = oneshot::channel();
        self.requests
            .send(LifecycleRequest { command, ack })
            .await
            .map_err(|_| PipelineError::TaskStopped(self.name))?;
        done.await.map_err(|_| PipelineError::TaskStopped(self.name))
    }
}

/// Drives a `PeriodicTask` once per period and owns its `TaskState`.
///
/// While suspended the tick branch is disabled, so the task does no work
/// until a `Resume` request arrives.
pub struct TaskRunner<T: PeriodicTask> {
    task: T,
    period: Duration,
    state: TaskState,
    requests: mpsc::Receiver<LifecycleRequest>,
    status: watch::Sender<TaskStatus>,
    shutdown: broadcast::Receiver<()>,
    metrics: Arc<TaskMetrics>,
}

impl<T: PeriodicTask> TaskRunner<T> {
    pub fn new(
        task: T,
        period: Duration,
        metrics: Arc<TaskMetrics>,
        shutdown: broadcast::Receiver<()>,
    ) -> (Self, TaskHandle) {
        let (requests_tx, requests) = mpsc::channel(LIFECYCLE_MAILBOX);
        let (status, status_rx) = watch::channel(TaskStatus {
            state: TaskState::Runnable,
            position: task.position(),
        });

        let handle = TaskHandle {
            name: task.name(),
            requests: requests_tx,
            status: status_rx,
        };

        let runner = Self {
            task,
            period,
            state: TaskState::Runnable,
            requests,
            status,
            shutdown,
            metrics,
        };

        (runner, handle)
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let name = self.task.name();

        // First unit of work happens one full period after start
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let period_ms = self.period.as_millis() as u64;
        info!(task = name, period_ms, "task started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.recv() => break,
                request = self.requests.recv() => match request {
                    Some(request) => self.handle_request(request, &mut interval),
                    None => break,
                },
                _ = interval.tick(), if self.state.is_runnable() => {
                    if !self.on_tick() {
                        break;
                    }
                }
            }
        }

        info!(task = name, "task stopped");
        Ok(())
    }

    fn on_tick(&mut self) -> bool {
        self.metrics.record_tick();

        match self.task.tick() {
            Tick::Moved => self.metrics.record_item(),
            Tick::Park(reason) => {
                self.metrics.record_suspension();
                self.set_state(TaskState::Suspended(reason));
            }
            Tick::Stop => {
                warn!(task = self.task.name(), "channel peer dropped");
                return false;
            }
        }

        self.publish();
        true
    }

    fn handle_request(&mut self, request: LifecycleRequest, interval: &mut Interval) {
        match request.command {
            LifecycleCommand::Suspend => {
                self.set_state(TaskState::Suspended(SuspendReason::Reset));
                self.task.on_suspend();
            }
            LifecycleCommand::Resume => {
                self.task.rearm();
                if !self.state.is_runnable() {
                    self.set_state(TaskState::Runnable);
                }
                interval.reset();
                self.metrics.record_reset();
            }
        }

        let status = self.publish();
        // The requester may have stopped waiting
        let _ = request.ack.send(status);
    }

    fn set_state(&mut self, next: TaskState) {
        if !self.state.can_transition_to(&next) {
            debug!(task = self.task.name(), state = ?self.state, next = ?next, "ignoring transition");
            return;
        }

        debug!(task = self.task.name(), from = ?self.state, to = ?next, "state change");
        self.state = next;
    }

    fn publish(&self) -> TaskStatus {
        let status = TaskStatus {
            state: self.state,
            position: self.task.position(),
        };
        self.status.send_replace(status);
        status
    }
}
