//! Factory scene listing.

use clap::Args;
use edumixer_config::{factory_scene, factory_scene_names, get_factory_scene};

#[derive(Args)]
pub struct ScenesArgs {
    /// Print this scene as TOML instead of listing
    name: Option<String>,
}

pub fn run(args: ScenesArgs) -> anyhow::Result<()> {
    if let Some(name) = args.name {
        let scene = factory_scene(&name)?;
        print!("{}", scene.to_toml()?);
        return Ok(());
    }

    println!("Factory Scenes");
    println!("==============\n");
    for id in factory_scene_names() {
        let Some(scene) = get_factory_scene(id) else {
            continue;
        };
        println!("  {:<14} {}", id, scene.description.as_deref().unwrap_or(""));
    }
    println!();
    println!("Tip: pass a name or a scene file with --scene:");
    println!("  edumixer levels --scene monitor-mix");
    Ok(())
}
