//! Tone parameters a scene maps to.

use clap::Args;
use edumixer_core::{ChannelId, map_parameters};

use super::common::SceneArgs;

#[derive(Args)]
pub struct MapArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Print the parameters as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: MapArgs) -> anyhow::Result<()> {
    let scene = args.scene.load()?;
    let params = map_parameters(&scene.console);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    println!("Scene: {}", scene.name);
    println!();
    println!("{:<6} {:>8} {:>8}", "Voice", "Volume", "Pan");
    for id in ChannelId::ALL {
        let voice = params.voice(id);
        println!("{:<6} {:>8.3} {:>+8.3}", id.number(), voice.volume, voice.pan);
    }
    println!();
    println!("Master volume: {:.3}", params.master_volume);
    Ok(())
}
