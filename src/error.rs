use thiserror::Error;

/// Outcome of a non-blocking channel operation that could not complete.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel is full")]
    Full,

    #[error("channel is empty")]
    Empty,

    #[error("channel peer has been dropped")]
    Disconnected,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to allocate channel with capacity {capacity}")]
    AllocationFailure { capacity: usize },

    #[error("result buffer is full ({capacity} values)")]
    ResultsFull { capacity: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("pipeline has not been started")]
    NotRunning,

    #[error("task {0} is no longer running")]
    TaskStopped(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
