pub mod sample;
pub mod task;

pub use sample::{Sample, SCALE};
pub use task::{PeriodicTask, Tick};
