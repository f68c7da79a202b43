//! Offline render of a scene through the reference synth.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use edumixer_core::{Scheduler, linear_to_db};
use edumixer_io::{render_offline, write_wav_stereo};
use edumixer_synth::PolySynth;

use super::common::{SceneArgs, format_level, load_session};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    output: PathBuf,

    #[command(flatten)]
    scene: SceneArgs,

    /// Duration in seconds
    #[arg(long, default_value = "5.0")]
    seconds: f32,

    /// Session config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let session = load_session(args.config.as_ref())?;
    let scene = args.scene.load()?;

    let synth = PolySynth::new(session.sample_rate as f32, session.synth);
    let mut scheduler = Scheduler::new(synth);
    scheduler.power_on()?;

    println!(
        "Rendering '{}' for {} s at {} Hz...",
        scene.name, args.seconds, session.sample_rate
    );
    let render = render_offline(
        &mut scheduler,
        &scene.console,
        args.seconds,
        session.tick_rate_hz,
    )?;
    scheduler.power_off()?;

    write_wav_stereo(&args.output, &render.samples, render.sample_rate)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("  Ticks: {}", render.ticks);
    println!("  Peak: {:.3} ({:.1} dBFS)", render.peak, linear_to_db(render.peak));
    println!("  Master L {}", format_level(render.last_levels.master.left));
    println!("  Master R {}", format_level(render.last_levels.master.right));
    if render.peak > 1.0 {
        tracing::warn!(
            peak = render.peak,
            "output clips; lower the master fader or synth headroom"
        );
    }
    println!("Wrote {}", args.output.display());
    Ok(())
}
