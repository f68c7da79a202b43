//! Console control state.
//!
//! Everything the control surface can change lives here: per-channel gain,
//! pan, fader, aux sends and routing; per-subgroup fader and master routing;
//! the master fader; and the per-bus aux tap point.
//!
//! The console has a fixed shape of four input channels, four subgroups
//! (paired 1–2 and 3–4), four aux buses and two headphone monitors. IDs are
//! 1-based newtypes so out-of-range nodes cannot be named:
//!
//! ```rust
//! use edumixer_core::{ChannelId, ConsoleState};
//!
//! let mut state = ConsoleState::default();
//! let ch2 = ChannelId::new(2).unwrap();
//! state.channel_mut(ch2).gain = 0.5;
//!
//! assert_eq!(ch2.index(), 1);
//! assert!(ChannelId::new(5).is_none());
//! ```
//!
//! [`ConsoleState`] is `Copy`, so a tick takes a complete snapshot by value
//! and never observes a half-applied edit.

use core::fmt;

/// Number of input channels.
pub const CHANNEL_COUNT: usize = 4;

/// Number of subgroups.
pub const SUBGROUP_COUNT: usize = 4;

/// Number of auxiliary send buses.
pub const AUX_BUS_COUNT: usize = 4;

/// Number of headphone monitors fed by the aux buses.
pub const HEADPHONE_COUNT: usize = 2;

macro_rules! fixed_id {
    ($(#[$meta:meta])* $name:ident, $count:expr, $label:literal, [$($idx:literal),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u8);

        impl $name {
            /// Every ID in ascending order.
            pub const ALL: [Self; $count] = [$(Self($idx)),+];

            /// Creates an ID from its 1-based number, or `None` if out of range.
            #[inline]
            pub const fn new(number: u8) -> Option<Self> {
                if number >= 1 && (number as usize) <= $count {
                    Some(Self(number - 1))
                } else {
                    None
                }
            }

            /// Creates an ID from a 0-based index, or `None` if out of range.
            #[inline]
            pub const fn from_index(index: usize) -> Option<Self> {
                if index < $count {
                    Some(Self(index as u8))
                } else {
                    None
                }
            }

            /// 1-based number as printed on the console.
            #[inline]
            pub const fn number(self) -> u8 {
                self.0 + 1
            }

            /// 0-based array index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.number())
            }
        }
    };
}

fixed_id!(
    /// Input channel ID (1–4).
    ChannelId,
    CHANNEL_COUNT,
    "CH",
    [0, 1, 2, 3]
);

fixed_id!(
    /// Subgroup ID (1–4). Subgroups 1–2 and 3–4 form stereo pairs.
    SubgroupId,
    SUBGROUP_COUNT,
    "SUB",
    [0, 1, 2, 3]
);

fixed_id!(
    /// Auxiliary send bus ID (1–4).
    AuxBus,
    AUX_BUS_COUNT,
    "AUX",
    [0, 1, 2, 3]
);

fixed_id!(
    /// Headphone monitor ID (1–2).
    Headphone,
    HEADPHONE_COUNT,
    "HP",
    [0, 1]
);

impl SubgroupId {
    /// True for the odd member of a pair, which carries the left side.
    #[inline]
    pub const fn is_left_of_pair(self) -> bool {
        self.0 % 2 == 0
    }
}

/// Where an aux bus taps each contributing channel.
///
/// The tap point is global per bus: all four channels feeding a bus use the
/// same setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AuxTap {
    /// After gain, before the channel fader.
    #[default]
    PreFader,
    /// After the channel fader.
    PostFader,
}

impl AuxTap {
    /// Picks the level this tap point sees.
    #[inline]
    pub const fn select(self, pre_fader: f32, post_fader: f32) -> f32 {
        match self {
            AuxTap::PreFader => pre_fader,
            AuxTap::PostFader => post_fader,
        }
    }

    /// Returns the other tap point.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            AuxTap::PreFader => AuxTap::PostFader,
            AuxTap::PostFader => AuxTap::PreFader,
        }
    }

    /// Short label for meter bridges.
    pub const fn label(self) -> &'static str {
        match self {
            AuxTap::PreFader => "PRE",
            AuxTap::PostFader => "POST",
        }
    }
}

/// Channel routing switches. Independent: any combination may be on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChannelRouting {
    /// Direct to the main stereo bus.
    pub to_main: bool,
    /// Into subgroups 1 (left) and 2 (right).
    pub to_sub12: bool,
    /// Into subgroups 3 (left) and 4 (right).
    pub to_sub34: bool,
}

impl Default for ChannelRouting {
    fn default() -> Self {
        Self {
            to_main: true,
            to_sub12: false,
            to_sub34: false,
        }
    }
}

/// One input channel strip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Channel {
    /// Input gain trim, 0 to 1.
    pub gain: f32,
    /// Pan position, -1 (hard left) to 1 (hard right).
    pub pan: f32,
    /// Channel fader, 0 to 1.
    pub fader: f32,
    /// Simulated source presence, 0 to 1.
    pub input_level: f32,
    /// Send level into each aux bus, 0 to 1.
    pub aux: [f32; AUX_BUS_COUNT],
    /// Routing switches.
    pub routing: ChannelRouting,
}

impl Channel {
    /// Send level into `bus`.
    #[inline]
    pub fn aux_send(&self, bus: AuxBus) -> f32 {
        self.aux[bus.index()]
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            gain: 0.0,
            pan: 0.0,
            fader: 0.75,
            input_level: 1.0,
            aux: [0.0; AUX_BUS_COUNT],
            routing: ChannelRouting::default(),
        }
    }
}

/// Subgroup-to-master routing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SubgroupRouting {
    /// Feed the master left side.
    pub to_master_left: bool,
    /// Feed the master right side.
    pub to_master_right: bool,
}

/// One subgroup strip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Subgroup {
    /// Subgroup fader, 0 to 1.
    pub fader: f32,
    /// Master routing switches.
    pub routing: SubgroupRouting,
}

impl Subgroup {
    /// Power-on layout for a subgroup: odd members feed master-left, even
    /// members feed master-right.
    pub const fn power_on(id: SubgroupId) -> Self {
        let left = id.is_left_of_pair();
        Self {
            fader: 0.75,
            routing: SubgroupRouting {
                to_master_left: left,
                to_master_right: !left,
            },
        }
    }
}

impl Default for Subgroup {
    fn default() -> Self {
        Self {
            fader: 0.75,
            routing: SubgroupRouting::default(),
        }
    }
}

/// Master section.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Master {
    /// Master fader, applied to both sides, 0 to 1.
    pub fader: f32,
}

impl Default for Master {
    fn default() -> Self {
        Self { fader: 0.8 }
    }
}

/// Complete control state of the console.
///
/// The default is the power-on layout: all gains at zero, faders at 0.75,
/// every channel routed to main, subgroups alternating master-left and
/// master-right, master at 0.8 and every aux bus tapping pre-fader.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleState {
    /// Input channels 1–4.
    pub channels: [Channel; CHANNEL_COUNT],
    /// Subgroups 1–4.
    pub subgroups: [Subgroup; SUBGROUP_COUNT],
    /// Master section.
    pub master: Master,
    /// Tap point of aux buses 1–4.
    pub aux_taps: [AuxTap; AUX_BUS_COUNT],
}

impl ConsoleState {
    /// Channel strip `id`.
    #[inline]
    pub fn channel(&self, id: ChannelId) -> &Channel {
        &self.channels[id.index()]
    }

    /// Mutable channel strip `id`.
    #[inline]
    pub fn channel_mut(&mut self, id: ChannelId) -> &mut Channel {
        &mut self.channels[id.index()]
    }

    /// Subgroup strip `id`.
    #[inline]
    pub fn subgroup(&self, id: SubgroupId) -> &Subgroup {
        &self.subgroups[id.index()]
    }

    /// Mutable subgroup strip `id`.
    #[inline]
    pub fn subgroup_mut(&mut self, id: SubgroupId) -> &mut Subgroup {
        &mut self.subgroups[id.index()]
    }

    /// Tap point of aux bus `bus`.
    #[inline]
    pub fn aux_tap(&self, bus: AuxBus) -> AuxTap {
        self.aux_taps[bus.index()]
    }

    /// Flips aux bus `bus` between pre- and post-fader.
    pub fn toggle_aux_tap(&mut self, bus: AuxBus) {
        let tap = &mut self.aux_taps[bus.index()];
        *tap = tap.toggled();
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            channels: [Channel::default(); CHANNEL_COUNT],
            subgroups: SubgroupId::ALL.map(Subgroup::power_on),
            master: Master::default(),
            aux_taps: [AuxTap::PreFader; AUX_BUS_COUNT],
        }
    }
}
