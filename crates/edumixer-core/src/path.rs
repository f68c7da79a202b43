//! Signal path of a single channel and a single subgroup.
//!
//! Both the level engine and the parameter mapper walk the graph through
//! these two functions, so the meter display and the synth backend always
//! see the same numbers.

use crate::console::{Channel, Subgroup};
use crate::pan::{StereoLevel, constant_power_pan};
use crate::topology::{BusSums, MASTER_SIDES};

/// One channel's levels at every stage, isolated from the other channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ChannelPath {
    /// `input_level × gain`.
    pub pre_fader: f32,
    /// `pre_fader × fader`.
    pub post_fader: f32,
    /// What this channel alone adds to the main bus and subgroup inputs.
    pub buses: BusSums,
}

pub(crate) fn channel_path(channel: &Channel) -> ChannelPath {
    let pre_fader = channel.input_level * channel.gain;
    let post_fader = pre_fader * channel.fader;

    let mut buses = BusSums::default();
    buses.route(&channel.routing, constant_power_pan(post_fader, channel.pan));

    ChannelPath {
        pre_fader,
        post_fader,
        buses,
    }
}

/// A subgroup's output for a given summed input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SubgroupFeed {
    /// Post-fader level.
    pub level: f32,
    /// What the subgroup adds to each master side.
    pub to_master: StereoLevel,
}

pub(crate) fn subgroup_feed(subgroup: &Subgroup, input: f32) -> SubgroupFeed {
    let level = input * subgroup.fader;
    let mut to_master = StereoLevel::SILENT;
    for side in MASTER_SIDES {
        if subgroup.routing.feeds(side) {
            to_master.add_to(side, level);
        }
    }
    SubgroupFeed { level, to_master }
}
