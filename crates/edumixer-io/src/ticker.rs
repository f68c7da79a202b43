//! Host-side periodic tick driver.
//!
//! [`Ticker`] calls a closure at a fixed cadence on a dedicated thread. The
//! closure usually owns a [`Scheduler`](edumixer_core::Scheduler), which keeps
//! every tick on one logical thread. The elapsed time since the previous tick
//! is passed along for display; the level math does not use it.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Longest single sleep, so `stop` returns promptly at slow tick rates.
const MAX_SLEEP: Duration = Duration::from_millis(20);

/// A running periodic callback. Stops and joins on drop.
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
    period: Duration,
}

impl Ticker {
    /// Spawns the tick thread at `rate_hz` ticks per second.
    ///
    /// The closure runs until it returns [`ControlFlow::Break`] or the
    /// ticker is stopped. A late tick is run immediately and the schedule
    /// re-anchors on it, so ticks are never skipped or bunched up.
    pub fn start<F>(rate_hz: f32, mut on_tick: F) -> Result<Self>
    where
        F: FnMut(Duration) -> ControlFlow<()> + Send + 'static,
    {
        if !rate_hz.is_finite() || rate_hz <= 0.0 {
            return Err(Error::InvalidTiming(format!("tick rate {rate_hz} Hz")));
        }
        let period = Duration::from_secs_f64(1.0 / f64::from(rate_hz));
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("edumixer-ticker".into())
            .spawn(move || {
                let mut ticks = 0u64;
                let mut last = Instant::now();
                let mut next = last + period;
                while !thread_stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    if now < next {
                        thread::sleep((next - now).min(MAX_SLEEP));
                        continue;
                    }
                    let elapsed = now - last;
                    last = now;
                    next = now + period;
                    ticks += 1;
                    if on_tick(elapsed).is_break() {
                        break;
                    }
                }
                ticks
            })?;

        tracing::debug!(rate_hz, period_us = period.as_micros() as u64, "ticker started");
        Ok(Self {
            stop,
            handle: Some(handle),
            period,
        })
    }

    /// Time between ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the tick thread has exited on its own.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stops ticking and waits for the thread. Returns the number of ticks
    /// that ran.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        match handle.join() {
            Ok(ticks) => {
                tracing::debug!(ticks, "ticker stopped");
                ticks
            }
            Err(_) => {
                tracing::warn!("tick closure panicked");
                0
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
