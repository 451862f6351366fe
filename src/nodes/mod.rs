pub mod control;
pub mod sampler;
pub mod transformer;

pub use control::{render_values, Command, ControlInterface};
pub use sampler::Sampler;
pub use transformer::Transformer;
