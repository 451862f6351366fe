use crate::buffers::{BoundedChannel, SharedResults};
use crate::config::PipelineConfig;
use crate::engine::runner::TaskRunner;
use crate::engine::state::PipelineState;
use crate::engine::supervisor::{LifecycleSupervisor, PipelineStatus};
use crate::engine::{Priority, TaskScheduler};
use crate::error::PipelineResult;
use crate::nodes::{ControlInterface, Sampler, Transformer};
use crate::observability::{MetricsCollector, PipelineMonitor};
use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::{broadcast, oneshot, watch};
use tracing::info;

/// Owned context of one acquisition pipeline: the sample channel, the shared
/// result buffer, the periodic tasks and the supervisor that resets them.
pub struct Pipeline {
    config: PipelineConfig,
    results: SharedResults,
    supervisor: LifecycleSupervisor,
    scheduler: TaskScheduler,
    shutdown_tx: broadcast::Sender<()>,
    metrics_collector: MetricsCollector,
    state: watch::Sender<PipelineState>,
    control_attached: bool,
}

impl Pipeline {
    /// Build every component. Fails if the config is invalid or the channel
    /// cannot be allocated; nothing is spawned until `start()`.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;

        let (sample_tx, sample_rx) = BoundedChannel::new(config.capacity)?.split();
        let results = SharedResults::new(config.capacity);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (shutdown_tx, _) = broadcast::channel(1);
        let mut metrics_collector = MetricsCollector::new();

        let (sampler, sampler_handle) = TaskRunner::new(
            Sampler::new(sample_tx, rng),
            config.sampler_period(),
            metrics_collector.track("sampler"),
            shutdown_tx.subscribe(),
        );

        let (transformer, transformer_handle) = TaskRunner::new(
            Transformer::new(sample_rx, results.clone()),
            config.transformer_period(),
            metrics_collector.track("transformer"),
            shutdown_tx.subscribe(),
        );

        let mut scheduler = TaskScheduler::new();
        scheduler.schedule(Priority::High, "sampler", sampler.run());
        scheduler.schedule(Priority::Normal, "transformer", transformer.run());

        let (state, state_rx) = watch::channel(PipelineState::Idle);
        let supervisor = LifecycleSupervisor::new(
            sampler_handle,
            transformer_handle,
            results.clone(),
            state_rx,
        );

        Ok(Self {
            config,
            results,
            supervisor,
            scheduler,
            shutdown_tx,
            metrics_collector,
            state,
            control_attached: false,
        })
    }

    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Spawn the periodic tasks. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> anyhow::Result<()> {
        self.transition_to(PipelineState::Running)?;

        let order = self.scheduler.start();
        info!(tasks = ?order, capacity = self.config.capacity, "pipeline started");
        Ok(())
    }

    /// Signal every task to stop and wait for them
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        if self.state() != PipelineState::Running {
            return Ok(());
        }

        // No receivers left just means every task already exited
        let _ = self.shutdown_tx.send(());
        let outcome = self.scheduler.join_all().await;

        self.transition_to(PipelineState::Stopped)?;
        info!("pipeline stopped");
        outcome
    }

    /// Register the command reader with the scheduler so it is spawned by
    /// `start()` alongside the Sampler and Transformer. The returned receiver
    /// fires once the reader stops, either at end of input or on shutdown.
    pub fn attach_control<R, W>(
        &mut self,
        reader: R,
        writer: W,
    ) -> anyhow::Result<oneshot::Receiver<()>>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        if self.state() != PipelineState::Idle || self.control_attached {
            return Err(anyhow!(
                "control interface must be attached once, before start"
            ));
        }
        self.control_attached = true;

        let mut control = self.control(reader, writer);
        let mut shutdown = self.shutdown_tx.subscribe();
        let (closed_tx, closed) = oneshot::channel();

        self.scheduler.schedule(Priority::Normal, "control", async move {
            let outcome = tokio::select! {
                outcome = control.run() => outcome,
                _ = shutdown.recv() => Ok(()),
            };
            // main may have stopped waiting already
            let _ = closed_tx.send(());
            outcome.map_err(anyhow::Error::from)
        });

        Ok(closed)
    }

    /// Build the command reader for this pipeline over the given text streams.
    /// The caller drives it; see `attach_control` for a scheduled reader.
    pub fn control<R, W>(&mut self, reader: R, writer: W) -> ControlInterface<R, W>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        ControlInterface::new(
            reader,
            writer,
            self.config.control_period(),
            self.supervisor.clone(),
            self.results.clone(),
            self.metrics_collector.track("control"),
        )
    }

    pub fn supervisor(&self) -> &LifecycleSupervisor {
        &self.supervisor
    }

    pub fn status(&self) -> PipelineStatus {
        self.supervisor.status()
    }

    pub fn results(&self) -> &SharedResults {
        &self.results
    }

    pub fn monitor(&self) -> PipelineMonitor {
        PipelineMonitor::new(self.metrics_collector.clone())
    }

    fn transition_to(&mut self, next: PipelineState) -> anyhow::Result<()> {
        let current = self.state();
        if !current.can_transition_to(&next) {
            return Err(anyhow!(
                "Invalid state transition: {} -> {}",
                current.name(),
                next.name()
            ));
        }
        self.state.send_replace(next);
        Ok(())
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        // Can't join here, but the tasks still get told to stop
        let _ = self.shutdown_tx.send(());
    }
}
