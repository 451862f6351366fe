use crate::error::{PipelineError, PipelineResult};
use std::sync::{Arc, Mutex, MutexGuard};

/// Fixed-capacity store of processed values with a write cursor.
///
/// `cursor` is where the next value lands. `filled` is the high-water mark of
/// the cursor since the last clear, i.e. how many entries hold real values.
#[derive(Debug, Clone)]
pub struct ResultBuffer {
    slots: Box<[f64]>,
    cursor: usize,
    filled: usize,
}

impl ResultBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            cursor: 0,
            filled: 0,
        }
    }

    /// Append at the cursor. Rejected without mutation when the cursor is at capacity.
    pub fn push(&mut self, value: f64) -> PipelineResult<usize> {
        if self.is_full() {
            return Err(PipelineError::ResultsFull {
                capacity: self.capacity(),
            });
        }

        let index = self.cursor;
        self.slots[index] = value;
        self.cursor += 1;
        self.filled = self.filled.max(self.cursor);
        Ok(index)
    }

    /// Move the cursor back to 0 without discarding written values
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.slots.fill(0.0);
        self.cursor = 0;
        self.filled = 0;
    }

    pub fn values(&self) -> &[f64] {
        &self.slots[..self.filled]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.cursor == self.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}

/// Result buffer shared between the Transformer (writer) and the Control Interface.
#[derive(Debug, Clone)]
pub struct SharedResults {
    inner: Arc<Mutex<ResultBuffer>>,
}

impl SharedResults {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ResultBuffer::new(capacity))),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, ResultBuffer> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the filled entries
    pub fn snapshot(&self) -> Vec<f64> {
        self.lock().values().to_vec()
    }
}
