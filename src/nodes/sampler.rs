use crate::buffers::SampleSender;
use crate::core::{PeriodicTask, Sample, Tick};
use crate::engine::SuspendReason;
use crate::error::ChannelError;
use rand::rngs::StdRng;
use tracing::{trace, warn};

/// Producer: one simulated sensor reading per period into the sample channel.
pub struct Sampler {
    tx: SampleSender,
    rng: StdRng,
    position: usize,
}

impl Sampler {
    pub fn new(tx: SampleSender, rng: StdRng) -> Self {
        Self {
            tx,
            rng,
            position: 0,
        }
    }
}

impl PeriodicTask for Sampler {
    fn name(&self) -> &'static str {
        "sampler"
    }

    fn tick(&mut self) -> Tick {
        let sample = Sample::random(&mut self.rng);

        match self.tx.try_send(sample) {
            Ok(()) => {
                trace!(raw = sample.raw(), position = self.position, "sample accepted");
                self.position += 1;
                Tick::Moved
            }
            Err(ChannelError::Disconnected) => Tick::Stop,
            Err(_) => {
                self.position = 0;
                warn!(
                    occupied = self.tx.occupied(),
                    capacity = self.tx.capacity(),
                    "buffer full"
                );
                Tick::Park(SuspendReason::ChannelFull)
            }
        }
    }

    fn rearm(&mut self) {
        self.position = 0;
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::BoundedChannel;
    use rand::SeedableRng;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_fifth_send_rejected_at_capacity_four() {
        let (tx, rx) = BoundedChannel::new(4).unwrap().split();
        let mut sampler = Sampler::new(tx, StdRng::seed_from_u64(1));

        for expected in 1..=4 {
            assert_eq!(sampler.tick(), Tick::Moved);
            assert_eq!(sampler.position(), expected);
        }

        assert_eq!(sampler.tick(), Tick::Park(SuspendReason::ChannelFull));
        assert_eq!(sampler.position(), 0);
        assert_eq!(rx.occupied(), 4);
        assert!(logs_contain("buffer full"));
    }

    #[test]
    fn test_stops_when_receiver_dropped() {
        let (tx, rx) = BoundedChannel::new(4).unwrap().split();
        drop(rx);
        let mut sampler = Sampler::new(tx, StdRng::seed_from_u64(1));

        assert_eq!(sampler.tick(), Tick::Stop);
    }

    #[test]
    fn test_rearm_resets_position() {
        let (tx, _rx) = BoundedChannel::new(4).unwrap().split();
        let mut sampler = Sampler::new(tx, StdRng::seed_from_u64(1));
        sampler.tick();
        sampler.tick();

        sampler.rearm();
        assert_eq!(sampler.position(), 0);
    }
}
