//! One-shot meter levels for a scene.

use clap::Args;
use edumixer_core::compute_levels;

use super::common::{SceneArgs, print_snapshot};

#[derive(Args)]
pub struct LevelsArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: LevelsArgs) -> anyhow::Result<()> {
    let scene = args.scene.load()?;
    let levels = compute_levels(&scene.console);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&levels)?);
        return Ok(());
    }

    println!("Scene: {}", scene.name);
    println!();
    print_snapshot(&levels);
    Ok(())
}
