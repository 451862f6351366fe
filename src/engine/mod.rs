pub mod pipeline;
pub mod priority;
pub mod runner;
pub mod scheduler;
pub mod state;
pub mod supervisor;

pub use pipeline::Pipeline;
pub use priority::Priority;
pub use runner::{LifecycleCommand, TaskHandle, TaskRunner};
pub use scheduler::TaskScheduler;
pub use state::{PipelineState, SuspendReason, TaskState, TaskStatus};
pub use supervisor::{LifecycleSupervisor, PipelineStatus};
