//! Live console session.
//!
//! The scheduler stays on this thread (an open output stream cannot move
//! between threads); the ticker thread only paces it through a channel.

use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use anyhow::Context;
use clap::Args;
use crossbeam_channel::RecvTimeoutError;
use edumixer_config::{Scene, SessionConfig};
use edumixer_core::{ControlStore, LevelSnapshot, NullBackend, Scheduler, ToneBackend};
use edumixer_io::{OutputConfig, StreamedSynth, Ticker};

use super::common::{SceneArgs, format_level, load_session, meter_bar};

/// Master meter full scale; four centred channels at unity reach about 2.83.
const MASTER_FULL_SCALE: f32 = 3.0;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Stop after this many ticks (runs until Ctrl+C otherwise)
    #[arg(long)]
    ticks: Option<u64>,

    /// Tick rate in Hz (overrides the session config)
    #[arg(long)]
    rate: Option<f32>,

    /// Play the reference synth on an output device
    #[arg(long)]
    audio: bool,

    /// Output device name (overrides the session config)
    #[arg(long)]
    device: Option<String>,

    /// Session config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the scene file when it changes
    #[arg(long, requires = "file")]
    watch: bool,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut session = load_session(args.config.as_ref())?;
    if let Some(rate) = args.rate {
        session.tick_rate_hz = rate;
    }
    if args.device.is_some() {
        session.output_device.clone_from(&args.device);
    }
    session.validate()?;
    let scene = args.scene.load()?;

    println!("Running scene: {}", scene.name);
    println!("  Tick rate: {} Hz", session.tick_rate_hz);
    if args.audio {
        println!(
            "  Output: {} ({} Hz, {} frames)",
            session.output_device.as_deref().unwrap_or("default device"),
            session.sample_rate,
            session.buffer_size
        );
    } else {
        println!("  Output: none (meters only, use --audio to listen)");
    }
    println!("\nPress Ctrl+C to stop...\n");

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let session_run = SessionRun {
        session: &session,
        store: ControlStore::new(scene.console),
        limit: args.ticks,
        watch: args.watch.then(|| args.scene.file.clone()).flatten(),
        running: &running,
    };

    if args.audio {
        let backend = StreamedSynth::new(OutputConfig {
            sample_rate: session.sample_rate,
            buffer_size: session.buffer_size,
            device_name: session.output_device.clone(),
            synth: session.synth,
        });
        session_run.drive(Scheduler::new(backend))
    } else {
        session_run.drive(Scheduler::new(NullBackend))
    }
}

struct SessionRun<'a> {
    session: &'a SessionConfig,
    store: ControlStore,
    limit: Option<u64>,
    watch: Option<PathBuf>,
    running: &'a AtomicBool,
}

impl SessionRun<'_> {
    fn drive<B>(self, mut scheduler: Scheduler<B>) -> anyhow::Result<()>
    where
        B: ToneBackend,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        scheduler.power_on().context("powering on the tone backend")?;

        let (tx, rx) = crossbeam_channel::unbounded::<Duration>();
        let ticker = Ticker::start(self.session.tick_rate_hz, move |elapsed| {
            if tx.send(elapsed).is_ok() {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })?;

        let report_every = ((self.session.tick_rate_hz / 2.0).round() as u64).max(1);
        let mut watched = self.watch.as_deref().and_then(modified);

        while self.running.load(Ordering::SeqCst) {
            let elapsed = match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(elapsed) => elapsed,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            let state = self.store.snapshot();
            let levels = *scheduler.tick(&state);
            let ticks = scheduler.ticks();

            if ticks.is_multiple_of(report_every) {
                print_master(elapsed, &levels);
                if let Some(path) = &self.watch {
                    self.reload_if_changed(path, &mut watched);
                }
            }
            if self.limit.is_some_and(|limit| ticks >= limit) {
                break;
            }
        }

        drop(rx);
        let paced = ticker.stop();
        tracing::debug!(paced, "ticker stopped");
        let final_levels = *scheduler.latest();
        scheduler.power_off().context("powering off the tone backend")?;

        println!();
        println!("Stopped after {} tick(s)", scheduler.ticks());
        println!("  Master L {}", format_level(final_levels.master.left));
        println!("  Master R {}", format_level(final_levels.master.right));
        Ok(())
    }

    fn reload_if_changed(&self, path: &Path, seen: &mut Option<SystemTime>) {
        let now = modified(path);
        if now == *seen {
            return;
        }
        *seen = now;
        match Scene::load(path) {
            Ok(scene) => {
                self.store.publish(scene.console);
                tracing::info!(scene = %scene.name, "scene reloaded");
            }
            Err(err) => tracing::warn!(error = %err, "scene reload failed, keeping current state"),
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn print_master(elapsed: Duration, levels: &LevelSnapshot) {
    println!(
        "{:>7.2}s  L {} {}  R {} {}",
        elapsed.as_secs_f32(),
        meter_bar(levels.master.left, MASTER_FULL_SCALE, 20),
        format_level(levels.master.left),
        meter_bar(levels.master.right, MASTER_FULL_SCALE, 20),
        format_level(levels.master.right),
    );
}
