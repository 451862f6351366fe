use crate::engine::Priority;
use anyhow::anyhow;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::future::Future;
use std::pin::Pin;
use tokio::task::JoinHandle;
use tracing::{debug, error};

type TaskFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Wrapper for prioritized tasks
struct PrioritizedTask {
    priority: Priority,
    task_id: usize,
    name: &'static str,
    future: TaskFuture,
}

impl PartialEq for PrioritizedTask {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.task_id == other.task_id
    }
}

impl Eq for PrioritizedTask {}

impl PartialOrd for PrioritizedTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrioritizedTask {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority first, then FIFO by task_id
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => other.task_id.cmp(&self.task_id),
            other => other,
        }
    }
}

/// Holds the fixed set of long-lived pipeline tasks and launches them
/// highest priority first.
pub struct TaskScheduler {
    pending: BinaryHeap<PrioritizedTask>,
    running: Vec<(&'static str, JoinHandle<anyhow::Result<()>>)>,
    next_task_id: usize,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            pending: BinaryHeap::new(),
            running: Vec::new(),
            next_task_id: 0,
        }
    }

    /// Register a task to be spawned by the next `start()`
    pub fn schedule<F>(&mut self, priority: Priority, name: &'static str, future: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.pending.push(PrioritizedTask {
            priority,
            task_id: self.next_task_id,
            name,
            future: Box::pin(future),
        });
        self.next_task_id += 1;
    }

    /// Spawn every pending task. Returns the task names in spawn order.
    pub fn start(&mut self) -> Vec<&'static str> {
        let mut order = Vec::with_capacity(self.pending.len());

        while let Some(task) = self.pending.pop() {
            debug!(task = task.name, priority = ?task.priority, "spawning task");
            order.push(task.name);
            self.running.push((task.name, tokio::spawn(task.future)));
        }

        order
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    /// Wait for every spawned task, returning the first failure
    pub async fn join_all(&mut self) -> anyhow::Result<()> {
        let mut first_error = None;

        for (name, handle) in self.running.drain(..) {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(anyhow!("task {} panicked or was aborted: {}", name, e)),
            };

            if let Err(e) = outcome {
                error!(task = name, error = %e, "task failed");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
