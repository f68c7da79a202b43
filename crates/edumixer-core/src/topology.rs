//! Static routing tables for the fixed console graph.
//!
//! ```text
//!              ┌──── main L/R ─────────────────────────┐
//! CH 1..4 ─────┼──── SUB 1 (L) / SUB 2 (R) ── master L/R ┼── MASTER
//!   │          └──── SUB 3 (L) / SUB 4 (R) ── master L/R ┘
//!   └── AUX 1..4 ── HP 1 L, HP 1 R, HP 2 L, HP 2 R
//! ```
//!
//! Channels never read subgroup or master output, so the graph is acyclic
//! by construction. The tables here describe every edge; [`BusSums`] is the
//! one routine that walks them.

use crate::console::{
    AUX_BUS_COUNT, AuxBus, ChannelRouting, Headphone, SUBGROUP_COUNT, SubgroupId, SubgroupRouting,
};
use crate::pan::{Side, StereoLevel};

/// A point a channel's panned output can be summed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// One side of the main stereo bus.
    Main(Side),
    /// A subgroup input.
    Subgroup(SubgroupId),
}

/// One of the three channel routing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRoute {
    /// Direct to main.
    Main,
    /// Subgroup pair 1–2.
    Sub12,
    /// Subgroup pair 3–4.
    Sub34,
}

impl ChannelRoute {
    /// Every channel route.
    pub const ALL: [Self; 3] = [Self::Main, Self::Sub12, Self::Sub34];

    /// Whether `routing` has this switch on.
    #[inline]
    pub const fn is_enabled(self, routing: &ChannelRouting) -> bool {
        match self {
            Self::Main => routing.to_main,
            Self::Sub12 => routing.to_sub12,
            Self::Sub34 => routing.to_sub34,
        }
    }

    /// Where the (left, right) halves of a panned channel land.
    pub const fn destinations(self) -> (Destination, Destination) {
        match self {
            Self::Main => (Destination::Main(Side::Left), Destination::Main(Side::Right)),
            Self::Sub12 => (subgroup(0), subgroup(1)),
            Self::Sub34 => (subgroup(2), subgroup(3)),
        }
    }
}

const fn subgroup(index: usize) -> Destination {
    Destination::Subgroup(SubgroupId::ALL[index])
}

/// Master sides a subgroup can feed.
pub const MASTER_SIDES: [Side; 2] = [Side::Left, Side::Right];

impl SubgroupRouting {
    /// Whether the switch for master `side` is on.
    #[inline]
    pub const fn feeds(&self, side: Side) -> bool {
        match side {
            Side::Left => self.to_master_left,
            Side::Right => self.to_master_right,
        }
    }
}

/// Fixed aux-bus to headphone wiring, indexed by aux bus.
pub const HEADPHONE_FEEDS: [(Headphone, Side); AUX_BUS_COUNT] = [
    (Headphone::ALL[0], Side::Left),
    (Headphone::ALL[0], Side::Right),
    (Headphone::ALL[1], Side::Left),
    (Headphone::ALL[1], Side::Right),
];

/// Headphone side fed by aux bus `bus`.
#[inline]
pub const fn headphone_feed(bus: AuxBus) -> (Headphone, Side) {
    HEADPHONE_FEEDS[bus.index()]
}

/// Aux bus feeding one side of headphone `hp`; the inverse of
/// [`headphone_feed`].
#[inline]
pub const fn aux_bus_for(hp: Headphone, side: Side) -> AuxBus {
    let offset = match side {
        Side::Left => 0,
        Side::Right => 1,
    };
    AuxBus::ALL[hp.index() * 2 + offset]
}

/// Running sums for the main bus and the subgroup inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BusSums {
    /// Main bus accumulation, before the master fader.
    pub main: StereoLevel,
    /// Subgroup input accumulations, before the subgroup faders.
    pub subgroups: [f32; SUBGROUP_COUNT],
}

impl BusSums {
    /// Adds `level` into `destination`.
    #[inline]
    pub fn accumulate(&mut self, destination: Destination, level: f32) {
        match destination {
            Destination::Main(side) => self.main.add_to(side, level),
            Destination::Subgroup(id) => self.subgroups[id.index()] += level,
        }
    }

    /// Fans a panned signal out along every enabled route.
    pub fn route(&mut self, routing: &ChannelRouting, signal: StereoLevel) {
        for route in ChannelRoute::ALL {
            if route.is_enabled(routing) {
                let (left, right) = route.destinations();
                self.accumulate(left, signal.left);
                self.accumulate(right, signal.right);
            }
        }
    }

    /// Adds every sum from `other`.
    pub fn merge(&mut self, other: &BusSums) {
        self.main += other.main;
        for (sum, add) in self.subgroups.iter_mut().zip(other.subgroups) {
            *sum += add;
        }
    }
}
