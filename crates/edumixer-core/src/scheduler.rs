//! Per-tick driver for the level engine and parameter mapper.
//!
//! ```text
//!            power_on / backend.start()
//!   ┌───────┐ ─────────────────────────▶ ┌────────┐
//!   │ Muted │                            │ Active │
//!   └───────┘ ◀───────────────────────── └────────┘
//!            power_off / backend.suspend()
//! ```
//!
//! While muted every tick publishes [`LevelSnapshot::SILENT`] without running
//! the engine or touching the backend. While active every tick computes a
//! fresh snapshot, maps it and forwards the result. Ticks are never skipped
//! or merged, and nothing is integrated over the tick period, so the caller
//! may tick at any cadence.

use crate::backend::ToneBackend;
use crate::console::ConsoleState;
use crate::levels::{LevelSnapshot, compute_levels};
use crate::mapper::map_parameters;

/// Whether the console is powered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerState {
    /// Powered off: silent meters, backend suspended.
    #[default]
    Muted,
    /// Powered on: live meters, backend receiving parameters.
    Active,
}

impl PowerState {
    /// Whether this is [`PowerState::Active`].
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Drives the engine and mapper once per tick and owns the backend.
#[derive(Debug)]
pub struct Scheduler<B: ToneBackend> {
    backend: B,
    power: PowerState,
    latest: LevelSnapshot,
    ticks: u64,
}

impl<B: ToneBackend> Scheduler<B> {
    /// Creates a muted scheduler. The backend is not started.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            power: PowerState::Muted,
            latest: LevelSnapshot::SILENT,
            ticks: 0,
        }
    }

    /// Current power state.
    #[inline]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Starts the backend and goes active.
    ///
    /// Does nothing when already active. If the backend fails to start the
    /// scheduler stays muted and the error is returned.
    pub fn power_on(&mut self) -> Result<PowerState, B::Error> {
        if self.power.is_active() {
            return Ok(self.power);
        }
        self.backend.start()?;
        self.power = PowerState::Active;
        #[cfg(feature = "tracing")]
        tracing::debug!(ticks = self.ticks, "console powered on");
        Ok(self.power)
    }

    /// Suspends the backend and goes muted.
    ///
    /// Does nothing when already muted. The scheduler is muted afterwards
    /// even when suspending fails, so no further parameters are sent.
    pub fn power_off(&mut self) -> Result<PowerState, B::Error> {
        if !self.power.is_active() {
            return Ok(self.power);
        }
        self.power = PowerState::Muted;
        #[cfg(feature = "tracing")]
        tracing::debug!(ticks = self.ticks, "console powered off");
        self.backend.suspend()?;
        Ok(self.power)
    }

    /// Flips the power state.
    pub fn toggle_power(&mut self) -> Result<PowerState, B::Error> {
        match self.power {
            PowerState::Muted => self.power_on(),
            PowerState::Active => self.power_off(),
        }
    }

    /// Runs one tick over `state` and returns the published snapshot.
    ///
    /// `state` is copied once up front; later changes by the caller do not
    /// affect this tick.
    pub fn tick(&mut self, state: &ConsoleState) -> &LevelSnapshot {
        self.ticks += 1;
        self.latest = match self.power {
            PowerState::Muted => LevelSnapshot::SILENT,
            PowerState::Active => {
                let state = *state;
                let snapshot = compute_levels(&state);
                self.backend.apply(&map_parameters(&state));
                snapshot
            }
        };
        &self.latest
    }

    /// Snapshot published by the most recent tick.
    #[inline]
    pub fn latest(&self) -> &LevelSnapshot {
        &self.latest
    }

    /// Number of ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Shared access to the backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to render audio from it.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Tears the scheduler down and returns the backend as-is.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
