//! Tokio-backed repeating timer.
//!
//! Arming spawns an interval task that sends a [`Tick`] down an unbounded
//! channel; disarming aborts it. The receiving side is drained by the game
//! loop, which then calls `GameState::tick` once per message.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use blockfall_core::RepeatingTimer;

/// One elapsed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Interval the timer was armed with when this tick fired
    pub interval_ms: u32,
}

/// [`RepeatingTimer`] running on a tokio runtime.
pub struct TokioTimer {
    handle: Handle,
    tick_tx: mpsc::UnboundedSender<Tick>,
    task: Option<JoinHandle<()>>,
    interval_ms: Option<u32>,
}

impl TokioTimer {
    pub fn new(handle: Handle, tick_tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self {
            handle,
            tick_tx,
            task: None,
            interval_ms: None,
        }
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl RepeatingTimer for TokioTimer {
    fn arm(&mut self, interval_ms: u32) {
        self.stop_task();

        let period = Duration::from_millis(interval_ms.max(1) as u64);
        let tx = self.tick_tx.clone();
        self.task = Some(self.handle.spawn(async move {
            // First tick one full period after arming.
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(Tick { interval_ms }).is_err() {
                    println!("[Runtime] Tick receiver dropped, stopping timer");
                    break;
                }
            }
        }));
        self.interval_ms = Some(interval_ms);
    }

    fn disarm(&mut self) {
        self.stop_task();
        self.interval_ms = None;
    }

    fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.stop_task();
    }
}

/// Owns the tokio runtime and the receiving end of the tick channel.
pub struct TickRuntime {
    rt: Runtime,
    tick_rx: mpsc::UnboundedReceiver<Tick>,
}

impl TickRuntime {
    /// Start a runtime and return it with a timer bound to it.
    pub fn start() -> Result<(Self, TokioTimer)> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-timer")
            .enable_time()
            .build()
            .context("failed to create tokio runtime")?;
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::new(rt.handle().clone(), tick_tx);
        Ok((Self { rt, tick_rx }, timer))
    }

    /// Next pending tick, without blocking
    pub fn try_recv(&mut self) -> Option<Tick> {
        self.tick_rx.try_recv().ok()
    }

    /// Discard ticks queued before a state change (e.g. pause)
    pub fn drain(&mut self) -> usize {
        let mut n = 0;
        while self.tick_rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    pub fn handle(&self) -> &Handle {
        self.rt.handle()
    }
}
