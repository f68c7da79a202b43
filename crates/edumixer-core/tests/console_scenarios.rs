//! End-to-end scenarios for the edumixer-core public API.
//!
//! Each test sets up a console the way a lesson would, ticks it through the
//! scheduler, and checks what the meters and the backend receive.

use core::f32::consts::FRAC_1_SQRT_2;

use edumixer_core::{
    AuxBus, AuxTap, ChannelId, ChannelRouting, ConsoleState, ControlStore, Headphone,
    NullBackend, PowerState, Scheduler, Side, SubgroupId, SubgroupRouting, ToneBackend,
    compute_levels, linear_to_db, map_parameters,
};

fn ch(n: u8) -> ChannelId {
    ChannelId::new(n).unwrap()
}

fn sub(n: u8) -> SubgroupId {
    SubgroupId::new(n).unwrap()
}

#[test]
fn four_channels_at_unity_to_main() {
    let mut state = ConsoleState::default();
    for c in &mut state.channels {
        c.gain = 1.0;
        c.fader = 1.0;
    }
    state.master.fader = 1.0;

    let levels = compute_levels(&state);
    assert_eq!(levels.channels, [1.0; 4]);
    let expected = 4.0 * FRAC_1_SQRT_2;
    assert!((levels.master.left - expected).abs() < 1e-5);
    assert!((levels.master.right - expected).abs() < 1e-5);
    assert!((linear_to_db(levels.master.left) - 9.03).abs() < 0.01);
}

#[test]
fn hard_left_through_first_subgroup() {
    let mut state = ConsoleState::default();
    {
        let c = state.channel_mut(ch(1));
        c.gain = 1.0;
        c.fader = 1.0;
        c.pan = -1.0;
        c.routing = ChannelRouting {
            to_main: false,
            to_sub12: true,
            to_sub34: false,
        };
    }
    state.subgroup_mut(sub(1)).fader = 1.0;
    state.subgroup_mut(sub(2)).routing = SubgroupRouting::default();
    state.master.fader = 1.0;

    let levels = compute_levels(&state);
    assert!((levels.subgroup(sub(1)) - 1.0).abs() < 1e-6);
    assert!(levels.subgroup(sub(2)).abs() < 1e-6);
    assert!((levels.master.left - 1.0).abs() < 1e-6);
    assert!(levels.master.right.abs() < 1e-6);

    let voice = map_parameters(&state).voice(ch(1));
    assert!((voice.volume - 1.0).abs() < 1e-6);
    assert!((voice.pan + 1.0).abs() < 1e-6);
}

#[test]
fn pre_and_post_fader_aux_buses() {
    let mut state = ConsoleState::default();
    {
        let c = state.channel_mut(ch(2));
        c.gain = 0.5;
        c.fader = 0.2;
        c.aux = [0.8; 4];
    }
    let post = AuxBus::new(2).unwrap();
    state.toggle_aux_tap(post);
    assert_eq!(state.aux_tap(post), AuxTap::PostFader);

    let levels = compute_levels(&state);
    let hp1 = levels.headphone(Headphone::new(1).unwrap());
    assert!((hp1.side(Side::Left).get(ch(2)) - 0.4).abs() < 1e-6);
    assert!((hp1.side(Side::Right).get(ch(2)) - 0.08).abs() < 1e-6);
    assert!((levels.aux_output(post) - 0.08).abs() < 1e-6);
}

#[test]
fn headphone_mix_keeps_sources_apart() {
    let mut state = ConsoleState::default();
    for (i, c) in state.channels.iter_mut().enumerate() {
        c.gain = 1.0;
        c.aux[2] = 0.1 * (i as f32 + 1.0);
    }
    let levels = compute_levels(&state);
    let hp2_left = levels.headphone(Headphone::new(2).unwrap()).left;
    for (got, want) in hp2_left.0.iter().zip([0.1, 0.2, 0.3, 0.4]) {
        assert!((got - want).abs() < 1e-6, "{got} vs {want}");
    }
    assert!((hp2_left.total() - 1.0).abs() < 1e-6);
}

#[test]
fn power_cycle_through_store() {
    let store = ControlStore::default();
    let mut scheduler = Scheduler::new(NullBackend);

    store.update(|s| s.channel_mut(ch(3)).gain = 1.0);
    assert!(scheduler.tick(&store.snapshot()).is_silent());

    assert_eq!(scheduler.power_on(), Ok(PowerState::Active));
    let lit = *scheduler.tick(&store.snapshot());
    assert_eq!(lit.channel(ch(3)), 0.75);

    assert_eq!(scheduler.power_off(), Ok(PowerState::Muted));
    assert!(scheduler.tick(&store.snapshot()).is_silent());
    assert_eq!(scheduler.ticks(), 3);
}

#[derive(Default)]
struct LastParams {
    started: bool,
    volumes: [f32; 4],
    pans: [f32; 4],
    master: f32,
}

impl ToneBackend for LastParams {
    type Error = core::convert::Infallible;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.started = true;
        Ok(())
    }

    fn suspend(&mut self) -> Result<(), Self::Error> {
        self.started = false;
        Ok(())
    }

    fn set_channel_parameters(&mut self, volumes: &[f32; 4], pans: &[f32; 4]) {
        self.volumes = *volumes;
        self.pans = *pans;
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master = volume;
    }
}

#[test]
fn borrowed_backend_sees_mapped_parameters() {
    let mut backend = LastParams::default();
    let mut state = ConsoleState::default();
    state.channel_mut(ch(4)).gain = 1.0;
    state.channel_mut(ch(4)).pan = 1.0;
    state.master.fader = 0.5;

    {
        let mut scheduler = Scheduler::new(&mut backend);
        scheduler.power_on().unwrap();
        scheduler.tick(&state);
    }

    assert!(backend.started);
    assert!((backend.volumes[3] - 0.75).abs() < 1e-5);
    assert!((backend.pans[3] - 1.0).abs() < 1e-5);
    assert_eq!(backend.volumes[0], 0.0);
    assert_eq!(backend.master, 0.5);
}
