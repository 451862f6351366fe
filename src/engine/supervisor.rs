use crate::buffers::SharedResults;
use crate::engine::runner::{LifecycleCommand, TaskHandle};
use crate::engine::state::{PipelineState, TaskStatus};
use crate::error::{PipelineError, PipelineResult};
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

/// Status of both periodic tasks at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineStatus {
    pub sampler: TaskStatus,
    pub transformer: TaskStatus,
}

/// The only component allowed to suspend and resume the Sampler and Transformer.
#[derive(Clone)]
pub struct LifecycleSupervisor {
    sampler: TaskHandle,
    transformer: TaskHandle,
    results: SharedResults,
    pipeline: watch::Receiver<PipelineState>,
}

impl LifecycleSupervisor {
    pub fn new(
        sampler: TaskHandle,
        transformer: TaskHandle,
        results: SharedResults,
        pipeline: watch::Receiver<PipelineState>,
    ) -> Self {
        Self {
            sampler,
            transformer,
            results,
            pipeline,
        }
    }

    /// Bring the pipeline back to its initial runnable state.
    ///
    /// Both tasks are parked before the result buffer is cleared, so neither
    /// the Transformer nor a dump can see a half-cleared buffer. Each resume
    /// re-enters the task's init path, leaving its position at 0.
    pub async fn reset(&self) -> PipelineResult<PipelineStatus> {
        // Runners that were never spawned would never acknowledge
        if *self.pipeline.borrow() == PipelineState::Idle {
            return Err(PipelineError::NotRunning);
        }

        self.sampler.request(LifecycleCommand::Suspend).await?;
        self.transformer.request(LifecycleCommand::Suspend).await?;

        self.results.lock().clear();

        let sampler = self.sampler.request(LifecycleCommand::Resume).await?;
        let transformer = self.transformer.request(LifecycleCommand::Resume).await?;

        info!(
            sampler = ?sampler.state,
            transformer = ?transformer.state,
            "pipeline reset"
        );

        Ok(PipelineStatus {
            sampler,
            transformer,
        })
    }

    pub fn status(&self) -> PipelineStatus {
        PipelineStatus {
            sampler: self.sampler.status(),
            transformer: self.transformer.status(),
        }
    }

    pub fn sampler(&self) -> &TaskHandle {
        &self.sampler
    }

    pub fn transformer(&self) -> &TaskHandle {
        &self.transformer
    }
}
