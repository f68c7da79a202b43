//! Edumixer Core - signal-flow model of a four-channel teaching console
//!
//! This crate models a small mixing console (four input channels, four
//! subgroups, a stereo master, four aux buses feeding two headphone monitors)
//! as a pure per-tick computation. The same model drives the meter display
//! and a tone-generation backend, so what students see is what they hear.
//!
//! # Core Abstractions
//!
//! ## Control State
//!
//! - [`ConsoleState`] - every knob, fader and switch; `Copy`, so a tick can
//!   take it by value
//! - [`ChannelId`], [`SubgroupId`], [`AuxBus`], [`Headphone`] - 1-based IDs
//!   that cannot go out of range
//! - [`AuxTap`] - pre- or post-fader tap, one per aux bus
//!
//! ## Computation
//!
//! - [`compute_levels`] - level engine, state to [`LevelSnapshot`]
//! - [`map_parameters`] - parameter mapper, state to [`BackendParameters`]
//! - [`constant_power_pan`] - the pan law both of them use
//!
//! ## Driving
//!
//! - [`Scheduler`] - muted/active state machine that runs one tick at a time
//! - [`ToneBackend`] - what the scheduler forwards parameters to
//! - [`ControlStore`] - copy-on-write state shared between a control thread
//!   and the tick loop (`std` only)
//!
//! ## Utilities
//!
//! - [`SmoothedParam`] - one-pole glide for backends
//! - [`db_to_linear`], [`linear_to_db`], [`meter_fraction`]
//!
//! # no_std Support
//!
//! Everything except [`ControlStore`] works without `std` and without an
//! allocator:
//!
//! ```toml
//! [dependencies]
//! edumixer-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use edumixer_core::{ChannelId, ConsoleState, NullBackend, Scheduler};
//!
//! let mut state = ConsoleState::default();
//! let ch1 = ChannelId::new(1).unwrap();
//! state.channel_mut(ch1).gain = 1.0;
//!
//! let mut scheduler = Scheduler::new(NullBackend);
//! assert!(scheduler.tick(&state).is_silent());
//!
//! scheduler.power_on().unwrap();
//! let levels = scheduler.tick(&state);
//! assert_eq!(levels.channel(ch1), 0.75);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod backend;
pub mod console;
pub mod levels;
pub mod mapper;
pub mod math;
pub mod pan;
pub mod param;
mod path;
pub mod scheduler;
#[cfg(feature = "std")]
pub mod store;
pub mod topology;

pub use backend::{NullBackend, ToneBackend};
pub use console::{
    AUX_BUS_COUNT, AuxBus, AuxTap, CHANNEL_COUNT, Channel, ChannelId, ChannelRouting,
    ConsoleState, HEADPHONE_COUNT, Headphone, Master, SUBGROUP_COUNT, Subgroup, SubgroupId,
    SubgroupRouting,
};
pub use levels::{HeadphoneLevels, LevelSnapshot, SourceLevels, compute_levels};
pub use mapper::{
    BackendParameters, SILENCE_THRESHOLD, VoiceTarget, channel_master_contribution,
    map_parameters,
};
pub use math::{METER_FLOOR_DB, db_to_linear, linear_to_db, meter_fraction};
pub use pan::{Side, StereoLevel, constant_power_gains, constant_power_pan};
pub use param::SmoothedParam;
pub use scheduler::{PowerState, Scheduler};
#[cfg(feature = "std")]
pub use store::ControlStore;
pub use topology::{BusSums, ChannelRoute, Destination, aux_bus_for, headphone_feed};
