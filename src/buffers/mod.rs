pub mod channel;
pub mod results;

pub use channel::{BoundedChannel, SampleReceiver, SampleSender};
pub use results::{ResultBuffer, SharedResults};
