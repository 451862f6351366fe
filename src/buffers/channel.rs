use crate::core::Sample;
use crate::error::{ChannelError, PipelineError, PipelineResult};
use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};

/// Fixed-capacity FIFO carrying samples from the Sampler to the Transformer.
///
/// Split into exactly one sending and one receiving half. Neither half ever
/// blocks: a full or empty channel is reported back to the caller.
pub struct BoundedChannel {
    tx: Sender<Sample>,
    rx: Receiver<Sample>,
    capacity: usize,
}

impl BoundedChannel {
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        // A zero-capacity crossbeam channel is a rendezvous point, not a buffer
        if capacity == 0 {
            return Err(PipelineError::AllocationFailure { capacity });
        }

        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Ok(Self { tx, rx, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn split(self) -> (SampleSender, SampleReceiver) {
        (
            SampleSender {
                tx: self.tx,
                capacity: self.capacity,
            },
            SampleReceiver {
                rx: self.rx,
                capacity: self.capacity,
            },
        )
    }
}

pub struct SampleSender {
    tx: Sender<Sample>,
    capacity: usize,
}

impl SampleSender {
    /// Offer a sample without waiting. `Err(ChannelError::Full)` leaves the channel untouched.
    pub fn try_send(&self, sample: Sample) -> Result<(), ChannelError> {
        self.tx.try_send(sample).map_err(|e| match e {
            TrySendError::Full(_) => ChannelError::Full,
            TrySendError::Disconnected(_) => ChannelError::Disconnected,
        })
    }

    pub fn occupied(&self) -> usize {
        self.tx.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.tx.is_full()
    }
}

pub struct SampleReceiver {
    rx: Receiver<Sample>,
    capacity: usize,
}

impl SampleReceiver {
    pub fn try_receive(&self) -> Result<Sample, ChannelError> {
        self.rx.try_recv().map_err(|e| match e {
            TryRecvError::Empty => ChannelError::Empty,
            TryRecvError::Disconnected => ChannelError::Disconnected,
        })
    }

    pub fn occupied(&self) -> usize {
        self.rx.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
