use crate::buffers::SharedResults;
use crate::engine::LifecycleSupervisor;
use crate::error::PipelineResult;
use crate::observability::TaskMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Line commands understood by the Control Interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `obter`: print the stored values
    Dump,
    /// `zerar`: reset the whole pipeline
    Reset,
}

impl Command {
    /// Exact, case-sensitive match after stripping the line terminator
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        match line {
            "obter" => Some(Self::Dump),
            "zerar" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Render values as `[ v0 v1 ... ]` with two decimals
pub fn render_values(values: &[f64]) -> String {
    let mut out = String::from("[");
    for value in values {
        out.push_str(&format!(" {:.2}", value));
    }
    out.push_str(" ]");
    out
}

/// Periodic reader of text commands.
pub struct ControlInterface<R, W> {
    reader: R,
    writer: W,
    line: String,
    period: Duration,
    supervisor: LifecycleSupervisor,
    results: SharedResults,
    metrics: Arc<TaskMetrics>,
}

impl<R, W> ControlInterface<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        reader: R,
        writer: W,
        period: Duration,
        supervisor: LifecycleSupervisor,
        results: SharedResults,
        metrics: Arc<TaskMetrics>,
    ) -> Self {
        Self {
            reader,
            writer,
            line: String::new(),
            period,
            supervisor,
            results,
            metrics,
        }
    }

    /// Poll for one line per period until the input is exhausted
    pub async fn run(&mut self) -> PipelineResult<()> {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("control interface ready");

        loop {
            interval.tick().await;
            if !self.poll_once().await? {
                break;
            }
        }

        info!("command input closed");
        Ok(())
    }

    /// Read and dispatch a single line. Returns `false` at end of input.
    pub async fn poll_once(&mut self) -> PipelineResult<bool> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line).await;
        self.metrics.record_tick();

        let command = match read {
            Ok(0) => {
                self.line.clear();
                return Ok(false);
            }
            Ok(_) => Command::parse(&self.line),
            Err(e) => {
                warn!(error = %e, "failed to read command");
                None
            }
        };

        if command.is_none() && !self.line.is_empty() {
            debug!(input = self.line.trim_end(), "ignoring unrecognized command");
        }
        self.line.clear();

        if let Some(command) = command {
            self.dispatch(command).await?;
        }

        Ok(true)
    }

    pub async fn dispatch(&mut self, command: Command) -> PipelineResult<()> {
        self.metrics.record_item();

        match command {
            Command::Dump => {
                let mut rendered = render_values(self.results.lock().values());
                rendered.push('\n');
                self.writer.write_all(rendered.as_bytes()).await?;
                self.writer.flush().await?;
            }
            Command::Reset => {
                self.supervisor.reset().await?;
                self.metrics.record_reset();
            }
        }

        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_match() {
        assert_eq!(Command::parse("obter\n"), Some(Command::Dump));
        assert_eq!(Command::parse("zerar\r\n"), Some(Command::Reset));
        assert_eq!(Command::parse("zerar"), Some(Command::Reset));
        assert_eq!(Command::parse("OBTER\n"), None);
        assert_eq!(Command::parse(" obter\n"), None);
        assert_eq!(Command::parse("obter \n"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_render_only_filled_entries() {
        assert_eq!(render_values(&[1.0, 2.0]), "[ 1.00 2.00 ]");
        assert_eq!(render_values(&[]), "[ ]");
        assert_eq!(render_values(&[3.14159]), "[ 3.14 ]");
    }
}
