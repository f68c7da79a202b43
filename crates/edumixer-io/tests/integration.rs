//! Integration tests for edumixer-io that need no audio hardware.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use edumixer_core::{ChannelId, ConsoleState, ControlStore, NullBackend, Scheduler};
use edumixer_io::{Ticker, read_wav_stereo, render_offline, write_wav_stereo};
use edumixer_synth::{PolySynth, SynthConfig};
use tempfile::tempdir;

#[test]
fn rendered_session_round_trips_through_wav() {
    let mut scheduler = Scheduler::new(PolySynth::new(22_050.0, SynthConfig::default()));
    scheduler.power_on().unwrap();
    let mut state = ConsoleState::default();
    state.channel_mut(ChannelId::new(4).unwrap()).gain = 1.0;
    state.channel_mut(ChannelId::new(4).unwrap()).pan = -1.0;

    let render = render_offline(&mut scheduler, &state, 0.5, 60.0).unwrap();
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.wav");
    write_wav_stereo(&path, &render.samples, render.sample_rate).unwrap();

    let (samples, rate) = read_wav_stereo(&path).unwrap();
    assert_eq!(rate, 22_050);
    assert_eq!(samples.len(), render.samples.len());

    // Hard-left voice: once the pan has glided over, the right side is quiet.
    let tail = &samples[samples.len() / 2..];
    let left: f32 = tail.iter().step_by(2).map(|s| s * s).sum();
    let right: f32 = tail.iter().skip(1).step_by(2).map(|s| s * s).sum();
    assert!(left > 0.0);
    assert!(right < left * 1e-3, "left {left} right {right}");
}

#[test]
fn ticker_drives_scheduler_from_store() {
    let store = Arc::new(ControlStore::default());
    let published = Arc::new(Mutex::new(None));
    let ticks = Arc::new(AtomicU64::new(0));

    let ticker = {
        let store = Arc::clone(&store);
        let published = Arc::clone(&published);
        let ticks = Arc::clone(&ticks);
        let mut scheduler = Scheduler::new(NullBackend);
        let _ = scheduler.power_on();
        Ticker::start(200.0, move |_elapsed| {
            let state = store.snapshot();
            let levels = *scheduler.tick(&state);
            if let Ok(mut slot) = published.lock() {
                *slot = Some(levels);
            }
            ticks.fetch_add(1, Ordering::Relaxed);
            ControlFlow::Continue(())
        })
        .unwrap()
    };

    store.update(|s| s.channels[1].gain = 1.0);
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let seen = published
            .lock()
            .unwrap()
            .is_some_and(|levels| levels.channels[1] == 0.75);
        if seen || Instant::now() > deadline {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
    }

    let ran = ticker.stop();
    assert!(ran > 0);
    assert_eq!(ran, ticks.load(Ordering::Relaxed));
    assert_eq!(published.lock().unwrap().map(|l| l.channels[1]), Some(0.75));
}
