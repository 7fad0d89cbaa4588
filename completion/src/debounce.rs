//! Coalescing delayed callback for keystroke bursts.
//!
//! One worker thread per timer. `queue` stores the latest payload and restarts the quiet
//! period; the callback fires once, on the worker, when the period elapses undisturbed.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

struct State<T> {
    pending: Option<T>,
    lifecycle: Lifecycle,
    delay: Duration,
    /// Bumped on every `start`; a worker exits once it no longer owns the current one.
    generation: u64,
}

struct Shared<T> {
    state: Mutex<State<T>>,
    wake: Condvar,
    callback: Box<dyn Fn(T) + Send + Sync>,
}

pub struct DebounceTimer<T: Send + 'static> {
    shared: Arc<Shared<T>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> DebounceTimer<T> {
    pub fn new(delay: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    pending: None,
                    lifecycle: Lifecycle::Idle,
                    delay,
                    generation: 0,
                }),
                wake: Condvar::new(),
                callback: Box::new(callback),
            }),
            worker: Mutex::new(None),
        }
    }

    /// Spawns the worker. Starting a running timer does nothing; a stopped one restarts.
    pub fn start(&self) -> io::Result<()> {
        let generation = {
            let mut state = self.shared.state.lock();
            if state.lifecycle == Lifecycle::Running {
                return Ok(());
            }
            state.lifecycle = Lifecycle::Running;
            state.generation += 1;
            state.generation
        };

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("debounce".to_string())
            .spawn(move || worker_loop(&shared, generation));

        match spawned {
            Ok(handle) => {
                // A worker stopped from its own callback was never joined; let it go.
                *self.worker.lock() = Some(handle);
                debug!(generation, "debounce worker started");
                Ok(())
            }
            Err(err) => {
                self.shared.state.lock().lifecycle = Lifecycle::Idle;
                Err(err)
            }
        }
    }

    /// Stops the worker, dropping any pending payload. Joins unless called from the
    /// callback itself. Stopping twice is a no-op.
    pub fn stop(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.lifecycle != Lifecycle::Running {
                return;
            }
            state.lifecycle = Lifecycle::Stopped;
            state.pending = None;
        }
        self.shared.wake.notify_all();

        let Some(handle) = self.worker.lock().take() else {
            return;
        };
        if handle.thread().id() == thread::current().id() {
            trace!("debounce stopped from its own callback");
            return;
        }
        if handle.join().is_err() {
            warn!("debounce worker panicked");
        }
        debug!("debounce worker stopped");
    }

    /// Replaces the pending payload and restarts the quiet period. Ignored once stopped.
    pub fn queue(&self, payload: T) {
        let mut state = self.shared.state.lock();
        if state.lifecycle == Lifecycle::Stopped {
            trace!("debounce queue after stop ignored");
            return;
        }
        state.pending = Some(payload);
        drop(state);
        self.shared.wake.notify_one();
    }

    /// Drops the pending payload without waking the worker.
    pub fn cancel(&self) {
        self.shared.state.lock().pending = None;
    }

    pub fn set_delay(&self, delay: Duration) {
        self.shared.state.lock().delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.shared.state.lock().delay
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.lock().lifecycle == Lifecycle::Running
    }

    pub fn has_pending(&self) -> bool {
        self.shared.state.lock().pending.is_some()
    }
}

impl<T: Send + 'static> Drop for DebounceTimer<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop<T>(shared: &Shared<T>, generation: u64) {
    let mut state = shared.state.lock();
    loop {
        if !owns(&state, generation) {
            break;
        }
        if state.pending.is_none() {
            shared.wake.wait(&mut state);
            continue;
        }

        let delay = state.delay;
        let timed_out = shared.wake.wait_for(&mut state, delay).timed_out();
        if !owns(&state, generation) {
            break;
        }
        if !timed_out {
            // Woken by a fresh payload: start the quiet period over.
            continue;
        }
        if let Some(payload) = state.pending.take() {
            trace!("debounce fired");
            MutexGuard::unlocked(&mut state, || (shared.callback)(payload));
        }
    }
}

fn owns<T>(state: &State<T>, generation: u64) -> bool {
    state.lifecycle == Lifecycle::Running && state.generation == generation
}
