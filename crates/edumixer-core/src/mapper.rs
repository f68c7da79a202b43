//! Parameter mapper: console state to tone-backend targets.
//!
//! The tone backend plays one voice per channel and accepts only a mono
//! volume and a pan position per voice, plus a master volume. The mapper
//! replays each channel's isolated path through the routing graph (direct to
//! main, or through a subgroup with that subgroup's fader and master
//! switches) to get the channel's own `(master_left, master_right)`
//! contribution, then reduces that pair:
//!
//! ```text
//! volume = master_left + master_right
//! pan    = clamp((master_right − master_left) / volume, −1, 1)   if volume > ε
//!        = 0                                                    otherwise
//! ```
//!
//! The aggregated bus sums from [`compute_levels`](crate::compute_levels) mix
//! all channels together and cannot be unmixed, which is why each channel is
//! replayed on its own. The replay goes through the same path helpers as the
//! level engine.
//!
//! The master fader is not folded into the per-channel volumes; it travels
//! separately as [`BackendParameters::master_volume`].

use crate::console::{CHANNEL_COUNT, ChannelId, ConsoleState, SubgroupId};
use crate::pan::StereoLevel;
use crate::path::{channel_path, subgroup_feed};

/// Below this total energy a channel counts as silent and gets pan 0.
pub const SILENCE_THRESHOLD: f32 = 1e-4;

/// Volume and pan target for one backend voice.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceTarget {
    /// Total energy proxy, `left + right`.
    pub volume: f32,
    /// Pan position in [-1, 1].
    pub pan: f32,
}

impl VoiceTarget {
    /// Reduces a stereo contribution to volume and pan.
    pub fn from_stereo(contribution: StereoLevel) -> Self {
        let volume = contribution.left + contribution.right;
        let pan = if volume > SILENCE_THRESHOLD {
            ((contribution.right - contribution.left) / volume).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self { volume, pan }
    }
}

/// Everything the backend receives on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackendParameters {
    /// Voice volume per channel.
    pub volumes: [f32; CHANNEL_COUNT],
    /// Voice pan per channel.
    pub pans: [f32; CHANNEL_COUNT],
    /// Master bus volume (the master fader).
    pub master_volume: f32,
}

impl BackendParameters {
    /// Target for channel `id`.
    #[inline]
    pub fn voice(&self, id: ChannelId) -> VoiceTarget {
        VoiceTarget {
            volume: self.volumes[id.index()],
            pan: self.pans[id.index()],
        }
    }
}

/// What channel `id` alone delivers to the master bus, before the master
/// fader.
pub fn channel_master_contribution(state: &ConsoleState, id: ChannelId) -> StereoLevel {
    let path = channel_path(state.channel(id));
    let mut contribution = path.buses.main;
    for sub in SubgroupId::ALL {
        let feed = subgroup_feed(state.subgroup(sub), path.buses.subgroups[sub.index()]);
        contribution += feed.to_master;
    }
    contribution
}

/// Maps the whole console to backend targets.
pub fn map_parameters(state: &ConsoleState) -> BackendParameters {
    let mut params = BackendParameters {
        master_volume: state.master.fader,
        ..BackendParameters::default()
    };
    for id in ChannelId::ALL {
        let voice = VoiceTarget::from_stereo(channel_master_contribution(state, id));
        params.volumes[id.index()] = voice.volume;
        params.pans[id.index()] = voice.pan;
    }
    params
}
