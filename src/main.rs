use sampletab::{Pipeline, PipelineConfig};
use tokio::io::{self, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PipelineConfig::default();

    let mut pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!(error = %e, "failed to build pipeline");
            return Err(e.into());
        }
    };

    let input_closed = pipeline.attach_control(BufReader::new(io::stdin()), io::stdout())?;
    pipeline.start()?;
    info!("commands: obter (dump results), zerar (reset)");

    // Fires at end of input; a control failure surfaces from shutdown()
    let _ = input_closed.await;

    pipeline.shutdown().await?;
    info!("\n{}", pipeline.monitor().generate_report());
    Ok(())
}
