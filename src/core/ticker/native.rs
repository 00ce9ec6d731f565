//! Native periodic tasks on dedicated OS threads.
//!
//! Each task thread blocks in `select!` on a `crossbeam_channel::tick` and a
//! stop channel. Cancelling drops the stop sender, which wakes the thread
//! immediately; the handle then joins it.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use tracing::{debug, warn};

use super::{ScheduledTask, Spawn, TaskHandle, TickFn};
use crate::core::TicketingError;

/// Spawns each periodic task on its own named OS thread.
#[derive(Debug, Clone, Default)]
pub struct ThreadSpawner {
    stack_size: Option<usize>,
}

impl ThreadSpawner {
    /// Spawner using the platform default stack size.
    pub const fn new() -> Self {
        Self { stack_size: None }
    }

    /// Spawner whose threads get `bytes` of stack.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

struct ThreadHandle {
    name: String,
    /// Dropping this disconnects the thread's stop channel.
    stop_tx: Sender<()>,
    thread: JoinHandle<()>,
}

impl TaskHandle for ThreadHandle {
    fn cancel(self: Box<Self>) {
        let Self {
            name,
            stop_tx,
            thread,
        } = *self;
        drop(stop_tx);
        if thread.join().is_err() {
            warn!(task = %name, "task thread panicked");
        } else {
            debug!(task = %name, "task thread joined");
        }
    }
}

impl Spawn for ThreadSpawner {
    fn spawn_periodic(
        &self,
        task: &ScheduledTask,
        tick_fn: TickFn,
    ) -> Result<Box<dyn TaskHandle>, TicketingError> {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let name = task.name.clone();
        let period = task.period;

        let mut builder =
            thread::Builder::new().name(format!("tp-{}", name.replace(' ', "-").to_lowercase()));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }

        let thread_name = name.clone();
        let thread = builder
            .spawn(move || run_ticks(&thread_name, period, stop_rx, tick_fn))
            .map_err(|e| TicketingError::Spawn(format!("{name}: {e}")))?;

        Ok(Box::new(ThreadHandle {
            name,
            stop_tx,
            thread,
        }))
    }
}

fn run_ticks(name: &str, period: Duration, stop_rx: Receiver<()>, mut tick_fn: TickFn) {
    debug!(task = name, period = ?period, "task thread started");
    let ticker = tick(period);
    loop {
        let stopped = select! {
            recv(stop_rx) -> _ => true,
            recv(ticker) -> _ => false,
        };
        if stopped {
            break;
        }
        tick_fn();
    }
    debug!(task = name, "task thread exiting");
}
