//! Periodic data-acquisition pipeline.
//!
//! A Sampler task feeds simulated sensor readings into a bounded channel, a
//! Transformer task scales them into a shared result buffer, and a Control
//! Interface reads `obter` / `zerar` commands to dump the results or reset
//! the whole pipeline.

pub mod buffers;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod nodes;
pub mod observability;

pub use config::PipelineConfig;
pub use engine::Pipeline;
pub use error::{ChannelError, PipelineError, PipelineResult};
