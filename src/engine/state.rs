use serde::{Deserialize, Serialize};

/// Why a periodic task parked itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspendReason {
    /// Sampler found the channel full
    ChannelFull,
    /// Transformer found the channel empty
    ChannelEmpty,
    /// Transformer found the result buffer at capacity
    ResultsFull,
    /// Held by the lifecycle supervisor during a reset
    Reset,
}

/// Execution state of the Sampler or Transformer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Runnable,
    Suspended(SuspendReason),
}

impl TaskState {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &TaskState) -> bool {
        use TaskState::*;

        matches!(
            (self, target),
            (Runnable, Suspended(_)) |
            (Suspended(_), Runnable) |
            // A reset may take over an already parked task
            (Suspended(_), Suspended(SuspendReason::Reset))
        )
    }

    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Runnable)
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::Runnable
    }
}

/// Observable snapshot of a periodic task, published after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    pub position: usize,
}

/// Lifecycle of the pipeline as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Idle,
    Running,
    Stopped,
}

impl PipelineState {
    pub fn can_transition_to(&self, target: &PipelineState) -> bool {
        use PipelineState::*;

        matches!((self, target), (Idle, Running) | (Running, Stopped))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::Idle
    }
}
