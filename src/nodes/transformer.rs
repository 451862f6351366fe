use crate::buffers::{ResultBuffer, SampleReceiver, SharedResults};
use crate::core::{PeriodicTask, Tick};
use crate::engine::SuspendReason;
use crate::error::ChannelError;
use tracing::{debug, info, trace, warn};

/// Consumer: drains one sample per period, scales it and appends it to the results.
pub struct Transformer {
    rx: SampleReceiver,
    results: SharedResults,
}

impl Transformer {
    pub fn new(rx: SampleReceiver, results: SharedResults) -> Self {
        Self { rx, results }
    }
}

impl PeriodicTask for Transformer {
    fn name(&self) -> &'static str {
        "transformer"
    }

    fn tick(&mut self) -> Tick {
        let mut results = self.results.lock();

        // Park before taking a sample so nothing is dropped on the floor
        if results.is_full() {
            if self.rx.is_empty() {
                return all_processed(&mut results);
            }
            warn!(capacity = results.capacity(), "result buffer full");
            return Tick::Park(SuspendReason::ResultsFull);
        }

        match self.rx.try_receive() {
            Ok(sample) => {
                let value = sample.process();
                match results.push(value) {
                    Ok(index) => {
                        trace!(raw = sample.raw(), value, index, "value stored");
                        Tick::Moved
                    }
                    Err(e) => {
                        warn!(error = %e, "dropping value");
                        Tick::Park(SuspendReason::ResultsFull)
                    }
                }
            }
            Err(ChannelError::Empty) => all_processed(&mut results),
            Err(_) => Tick::Stop,
        }
    }

    /// Samples queued before a reset belong to the old cycle
    fn on_suspend(&mut self) {
        let mut discarded = 0usize;
        while self.rx.try_receive().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "drained stale samples");
        }
    }

    fn rearm(&mut self) {
        self.results.lock().rewind();
    }

    fn position(&self) -> usize {
        self.results.lock().cursor()
    }
}

fn all_processed(results: &mut ResultBuffer) -> Tick {
    results.rewind();
    info!(stored = results.filled(), "all values processed");
    Tick::Park(SuspendReason::ChannelEmpty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::BoundedChannel;
    use crate::core::Sample;
    use std::f64::consts::PI;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_empty_channel_parks_and_rewinds() {
        let (tx, rx) = BoundedChannel::new(4).unwrap().split();
        let results = SharedResults::new(4);
        let mut transformer = Transformer::new(rx, results.clone());

        tx.try_send(Sample::new(10).unwrap()).unwrap();
        assert_eq!(transformer.tick(), Tick::Moved);
        assert_eq!(transformer.position(), 1);

        assert_eq!(transformer.tick(), Tick::Park(SuspendReason::ChannelEmpty));
        assert_eq!(transformer.position(), 0);
        assert_eq!(results.snapshot(), vec![10.0 * PI]);
        assert!(logs_contain("all values processed"));
    }

    #[test]
    fn test_parks_when_results_full_without_consuming() {
        let (tx, rx) = BoundedChannel::new(4).unwrap().split();
        let results = SharedResults::new(1);
        let mut transformer = Transformer::new(rx, results.clone());

        tx.try_send(Sample::new(1).unwrap()).unwrap();
        tx.try_send(Sample::new(2).unwrap()).unwrap();

        assert_eq!(transformer.tick(), Tick::Moved);
        assert_eq!(transformer.tick(), Tick::Park(SuspendReason::ResultsFull));
        assert_eq!(tx.occupied(), 1);
        assert_eq!(results.snapshot(), vec![PI]);
    }

    #[traced_test]
    #[test]
    fn test_full_results_with_drained_channel_rewinds() {
        let (tx, rx) = BoundedChannel::new(2).unwrap().split();
        let results = SharedResults::new(2);
        let mut transformer = Transformer::new(rx, results.clone());

        tx.try_send(Sample::new(1).unwrap()).unwrap();
        tx.try_send(Sample::new(2).unwrap()).unwrap();
        assert_eq!(transformer.tick(), Tick::Moved);
        assert_eq!(transformer.tick(), Tick::Moved);
        assert_eq!(transformer.position(), 2);

        assert_eq!(transformer.tick(), Tick::Park(SuspendReason::ChannelEmpty));
        assert_eq!(transformer.position(), 0);
        assert_eq!(results.snapshot(), vec![PI, 2.0 * PI]);
        assert!(logs_contain("all values processed"));
        assert!(!logs_contain("result buffer full"));
    }

    #[test]
    fn test_suspend_discards_queued_samples() {
        let (tx, rx) = BoundedChannel::new(3).unwrap().split();
        let results = SharedResults::new(3);
        let mut transformer = Transformer::new(rx, results.clone());

        for raw in [4, 5, 6] {
            tx.try_send(Sample::new(raw).unwrap()).unwrap();
        }
        transformer.on_suspend();

        assert_eq!(tx.occupied(), 0);
        assert!(results.snapshot().is_empty());
        assert_eq!(transformer.tick(), Tick::Park(SuspendReason::ChannelEmpty));
    }
}
