//! Level computation engine.
//!
//! [`compute_levels`] is a pure function from a [`ConsoleState`] to a
//! [`LevelSnapshot`]. It carries no state between calls: the same input
//! always yields a bit-identical snapshot.
//!
//! # Signal flow
//!
//! 1. Each channel: `pre = input × gain`, `post = pre × fader`.
//! 2. `post` is split with the constant-power pan law.
//! 3. The stereo pair fans out to main and/or subgroup pairs (odd member
//!    takes the left half, even member the right half).
//! 4. Each aux bus taps `pre` or `post` per its tap point and scales by the
//!    channel's send level. Contributions stay separate per source channel.
//! 5. Each subgroup sums its inputs, applies its fader, and feeds the master
//!    sides it is switched to.
//! 6. The master sums both sides and applies the master fader.
//! 7. Aux buses 1–4 appear unchanged on headphone 1 L/R and 2 L/R.
//!
//! No clamping or validation is done here. Control values are expected to
//! be inside their documented ranges already.
//!
//! # Example
//!
//! ```rust
//! use edumixer_core::{ConsoleState, compute_levels};
//!
//! let mut state = ConsoleState::default();
//! for ch in &mut state.channels {
//!     ch.gain = 1.0;
//!     ch.fader = 1.0;
//! }
//! state.master.fader = 1.0;
//!
//! let levels = compute_levels(&state);
//! assert!((levels.master.left - 4.0 * core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
//! ```

use crate::console::{
    AUX_BUS_COUNT, AuxBus, CHANNEL_COUNT, ChannelId, ConsoleState, HEADPHONE_COUNT, Headphone,
    SUBGROUP_COUNT, SubgroupId,
};
use crate::pan::{Side, StereoLevel};
use crate::path::{channel_path, subgroup_feed};
use crate::topology::{BusSums, headphone_feed};

/// Per-source breakdown of a monitor signal, indexed by channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceLevels(pub [f32; CHANNEL_COUNT]);

impl SourceLevels {
    /// All sources silent.
    pub const SILENT: Self = Self([0.0; CHANNEL_COUNT]);

    /// Contribution of channel `id`.
    #[inline]
    pub fn get(&self, id: ChannelId) -> f32 {
        self.0[id.index()]
    }

    /// Sum of every source.
    pub fn total(&self) -> f32 {
        self.0.iter().sum()
    }

    #[inline]
    fn add(&mut self, id: ChannelId, level: f32) {
        self.0[id.index()] += level;
    }
}

/// Both ears of a headphone monitor, each with its per-source breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadphoneLevels {
    /// Left ear sources.
    pub left: SourceLevels,
    /// Right ear sources.
    pub right: SourceLevels,
}

impl HeadphoneLevels {
    /// Sources on one ear.
    #[inline]
    pub fn side(&self, side: Side) -> &SourceLevels {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SourceLevels {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Levels at every metered node of the console for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelSnapshot {
    /// Post-fader level of channels 1–4.
    pub channels: [f32; CHANNEL_COUNT],
    /// Post-fader level of subgroups 1–4.
    pub subgroups: [f32; SUBGROUP_COUNT],
    /// Master output after the master fader.
    pub master: StereoLevel,
    /// Headphone monitors 1–2.
    pub headphones: [HeadphoneLevels; HEADPHONE_COUNT],
}

impl LevelSnapshot {
    /// Every meter at zero.
    pub const SILENT: Self = Self {
        channels: [0.0; CHANNEL_COUNT],
        subgroups: [0.0; SUBGROUP_COUNT],
        master: StereoLevel::SILENT,
        headphones: [HeadphoneLevels {
            left: SourceLevels::SILENT,
            right: SourceLevels::SILENT,
        }; HEADPHONE_COUNT],
    };

    /// Post-fader level of channel `id`.
    #[inline]
    pub fn channel(&self, id: ChannelId) -> f32 {
        self.channels[id.index()]
    }

    /// Post-fader level of subgroup `id`.
    #[inline]
    pub fn subgroup(&self, id: SubgroupId) -> f32 {
        self.subgroups[id.index()]
    }

    /// Headphone monitor `hp`.
    #[inline]
    pub fn headphone(&self, hp: Headphone) -> &HeadphoneLevels {
        &self.headphones[hp.index()]
    }

    /// Per-source breakdown carried by aux bus `bus`.
    pub fn aux_sends(&self, bus: AuxBus) -> &SourceLevels {
        let (hp, side) = headphone_feed(bus);
        self.headphone(hp).side(side)
    }

    /// Summed level of aux bus `bus`.
    pub fn aux_output(&self, bus: AuxBus) -> f32 {
        self.aux_sends(bus).total()
    }

    /// True when every meter reads exactly zero.
    pub fn is_silent(&self) -> bool {
        *self == Self::SILENT
    }

    fn aux_sends_mut(&mut self, bus: AuxBus) -> &mut SourceLevels {
        let (hp, side) = headphone_feed(bus);
        self.headphones[hp.index()].side_mut(side)
    }
}

/// Computes every node level for `state`.
pub fn compute_levels(state: &ConsoleState) -> LevelSnapshot {
    let mut snapshot = LevelSnapshot::SILENT;
    let mut sums = BusSums::default();

    for id in ChannelId::ALL {
        let channel = state.channel(id);
        let path = channel_path(channel);

        snapshot.channels[id.index()] = path.post_fader;
        sums.merge(&path.buses);

        for bus in AuxBus::ALL {
            let tapped = state.aux_tap(bus).select(path.pre_fader, path.post_fader);
            snapshot
                .aux_sends_mut(bus)
                .add(id, tapped * channel.aux_send(bus));
        }
    }

    let mut master = sums.main;
    for id in SubgroupId::ALL {
        let feed = subgroup_feed(state.subgroup(id), sums.subgroups[id.index()]);
        snapshot.subgroups[id.index()] = feed.level;
        master += feed.to_master;
    }
    snapshot.master = master.scaled(state.master.fader);

    snapshot
}

const _: () = assert!(AUX_BUS_COUNT == 2 * HEADPHONE_COUNT);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{AuxTap, ChannelRouting, SubgroupRouting};

    fn unity(state: &mut ConsoleState) {
        for ch in &mut state.channels {
            ch.gain = 1.0;
            ch.fader = 1.0;
        }
        state.master.fader = 1.0;
    }

    fn ch(n: u8) -> ChannelId {
        ChannelId::new(n).unwrap()
    }

    fn bus(n: u8) -> AuxBus {
        AuxBus::new(n).unwrap()
    }

    #[test]
    fn power_on_console_is_silent() {
        let levels = compute_levels(&ConsoleState::default());
        assert!(levels.is_silent());
    }

    #[test]
    fn four_channels_to_main_at_centre() {
        let mut state = ConsoleState::default();
        unity(&mut state);
        let levels = compute_levels(&state);

        for id in ChannelId::ALL {
            assert_eq!(levels.channel(id), 1.0);
        }
        assert!((levels.master.left - 2.828427).abs() < 1e-4);
        assert!((levels.master.right - 2.828427).abs() < 1e-4);
        assert_eq!(levels.subgroups, [0.0; SUBGROUP_COUNT]);
    }

    #[test]
    fn hard_left_through_subgroup_one() {
        let mut state = ConsoleState::default();
        state.master.fader = 1.0;
        for c in &mut state.channels {
            c.routing.to_main = false;
        }
        {
            let c1 = state.channel_mut(ch(1));
            c1.gain = 1.0;
            c1.fader = 1.0;
            c1.pan = -1.0;
            c1.routing = ChannelRouting {
                to_main: false,
                to_sub12: true,
                to_sub34: false,
            };
        }
        state.subgroups[0].fader = 1.0;
        state.subgroups[0].routing = SubgroupRouting {
            to_master_left: true,
            to_master_right: false,
        };
        state.subgroups[1].routing = SubgroupRouting::default();

        let levels = compute_levels(&state);
        assert!((levels.subgroups[0] - 1.0).abs() < 1e-6);
        assert!(levels.subgroups[1].abs() < 1e-6);
        assert!((levels.master.left - 1.0).abs() < 1e-6);
        assert!(levels.master.right.abs() < 1e-6);
    }

    #[test]
    fn pre_and_post_taps_differ_when_fader_is_down() {
        let mut state = ConsoleState::default();
        let c1 = state.channel_mut(ch(1));
        c1.gain = 0.5;
        c1.fader = 0.2;
        c1.aux = [0.8; AUX_BUS_COUNT];
        state.aux_taps = [
            AuxTap::PreFader,
            AuxTap::PostFader,
            AuxTap::PreFader,
            AuxTap::PostFader,
        ];

        let levels = compute_levels(&state);
        let pre = levels.aux_sends(bus(1)).get(ch(1));
        let post = levels.aux_sends(bus(2)).get(ch(1));
        assert!((pre - 0.4).abs() < 1e-6);
        assert!((post - 0.08).abs() < 1e-6);
        assert_ne!(pre, post);
    }

    #[test]
    fn headphones_keep_per_source_breakdown() {
        let mut state = ConsoleState::default();
        unity(&mut state);
        state.channels[0].aux[2] = 0.5;
        state.channels[3].aux[2] = 0.25;

        let levels = compute_levels(&state);
        let hp2 = levels.headphone(Headphone::new(2).unwrap());
        assert_eq!(hp2.left.0, [0.5, 0.0, 0.0, 0.25]);
        assert_eq!(hp2.right, SourceLevels::SILENT);
        assert_eq!(levels.aux_output(bus(3)), 0.75);
    }

    #[test]
    fn aux_sends_ignore_main_routing() {
        let mut state = ConsoleState::default();
        let c2 = state.channel_mut(ch(2));
        c2.gain = 1.0;
        c2.aux[0] = 1.0;
        c2.routing = ChannelRouting {
            to_main: false,
            to_sub12: false,
            to_sub34: false,
        };
        let levels = compute_levels(&state);
        assert_eq!(levels.aux_sends(bus(1)).get(ch(2)), 1.0);
        assert_eq!(levels.master, StereoLevel::SILENT);
    }

    #[test]
    fn subgroup_published_even_when_unrouted() {
        let mut state = ConsoleState::default();
        unity(&mut state);
        for c in &mut state.channels {
            c.routing = ChannelRouting {
                to_main: false,
                to_sub12: false,
                to_sub34: true,
            };
        }
        for s in &mut state.subgroups {
            s.fader = 1.0;
            s.routing = SubgroupRouting::default();
        }
        let levels = compute_levels(&state);
        assert!(levels.subgroups[2] > 2.8);
        assert!(levels.subgroups[3] > 2.8);
        assert_eq!(levels.master, StereoLevel::SILENT);
    }

    #[test]
    fn master_fader_scales_both_sides() {
        let mut state = ConsoleState::default();
        unity(&mut state);
        let full = compute_levels(&state).master;
        state.master.fader = 0.5;
        let half = compute_levels(&state).master;
        assert!((half.left - full.left * 0.5).abs() < 1e-6);
        assert!((half.right - full.right * 0.5).abs() < 1e-6);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let mut state = ConsoleState::default();
        unity(&mut state);
        state.channels[1].pan = 0.3;
        state.channels[2].routing.to_sub12 = true;
        state.channels[3].aux = [0.1, 0.2, 0.3, 0.4];

        let a = compute_levels(&state);
        let b = compute_levels(&state);
        assert_eq!(a.master.left.to_bits(), b.master.left.to_bits());
        assert_eq!(a.master.right.to_bits(), b.master.right.to_bits());
        assert_eq!(a, b);
    }
}
