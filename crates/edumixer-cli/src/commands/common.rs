//! Shared CLI helpers used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use edumixer_config::{Scene, SessionConfig, get_factory_scene};
use edumixer_core::{
    ChannelId, Headphone, LevelSnapshot, Side, SubgroupId, linear_to_db, meter_fraction,
};

/// Scene selection shared by every command that needs a console state.
#[derive(Args, Debug, Clone, Default)]
pub struct SceneArgs {
    /// Factory scene name (see `edumixer scenes`) or path to a scene file
    #[arg(short, long, conflicts_with = "file")]
    pub scene: Option<String>,

    /// Scene file (TOML)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl SceneArgs {
    /// Resolves the selected scene; the classroom scene when none is given.
    ///
    /// Names are tried as factory scenes first, then as file paths.
    pub fn load(&self) -> anyhow::Result<Scene> {
        if let Some(path) = &self.file {
            return Scene::load(path).with_context(|| format!("loading {}", path.display()));
        }
        let name = self.scene.as_deref().unwrap_or("classroom");
        if let Some(scene) = get_factory_scene(name) {
            return Ok(scene);
        }
        let path = PathBuf::from(name);
        if path.exists() {
            return Scene::load(&path).with_context(|| format!("loading {}", path.display()));
        }
        anyhow::bail!("Scene '{name}' not found. Use 'edumixer scenes' to see available scenes.")
    }
}

/// Loads a session file, or the defaults when none is given.
pub fn load_session(path: Option<&PathBuf>) -> anyhow::Result<SessionConfig> {
    match path {
        Some(path) => {
            SessionConfig::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(SessionConfig::default()),
    }
}

/// Linear level with its dB reading, e.g. `0.750 ( -2.5 dB)`.
pub fn format_level(level: f32) -> String {
    format!("{level:6.3} ({:5.1} dB)", linear_to_db(level))
}

/// Fixed-width bar for a meter reading against `full_scale`.
pub fn meter_bar(level: f32, full_scale: f32, width: usize) -> String {
    let filled = (meter_fraction(level, full_scale) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// Prints every metered node of a snapshot.
pub fn print_snapshot(levels: &LevelSnapshot) {
    println!("Channels (post-fader):");
    for id in ChannelId::ALL {
        println!("  {:<6} {}", id.to_string(), format_level(levels.channel(id)));
    }
    println!("Subgroups (post-fader):");
    for id in SubgroupId::ALL {
        println!("  {:<6} {}", id.to_string(), format_level(levels.subgroup(id)));
    }
    println!("Master:");
    println!("  {:<6} {}", "L", format_level(levels.master.left));
    println!("  {:<6} {}", "R", format_level(levels.master.right));
    println!("Headphones:");
    for hp in Headphone::ALL {
        let mix = levels.headphone(hp);
        for side in [Side::Left, Side::Right] {
            let sends = mix.side(side);
            let parts: Vec<String> = ChannelId::ALL
                .iter()
                .map(|&id| format!("{:.3}", sends.get(id)))
                .collect();
            println!(
                "  {:<6} {}  [{}]",
                format!("{hp} {}", side_label(side)),
                format_level(sends.total()),
                parts.join(" ")
            );
        }
    }
}

/// One-letter label for a stereo side.
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::Left => "L",
        Side::Right => "R",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_classroom() {
        let scene = SceneArgs::default().load().unwrap();
        assert_eq!(scene.name, "Classroom");
    }

    #[test]
    fn unknown_scene_is_an_error() {
        let args = SceneArgs {
            scene: Some("no-such-scene".to_string()),
            file: None,
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn level_format_includes_db() {
        assert_eq!(format_level(1.0), " 1.000 (  0.0 dB)");
        assert!(format_level(0.0).contains("-60.0 dB"));
    }

    #[test]
    fn meter_bar_is_fixed_width() {
        assert_eq!(meter_bar(0.0, 1.0, 8), "--------");
        assert_eq!(meter_bar(1.0, 1.0, 8), "########");
        assert_eq!(meter_bar(9.0, 1.0, 8).len(), 8);
    }
}
