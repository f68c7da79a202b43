//! Scenes bundled with the library.
//!
//! These are embedded at compile time and make useful starting points for a
//! lesson: each one isolates a single part of the signal flow.

use crate::{ConfigError, Scene};

/// Identifiers of the factory scenes, in listing order.
pub static FACTORY_SCENE_NAMES: &[&str] =
    &["classroom", "all-mains", "left-subgroup", "monitor-mix"];

static FACTORY_SCENES_TOML: &[(&str, &str)] = &[
    ("classroom", CLASSROOM_SCENE),
    ("all-mains", ALL_MAINS_SCENE),
    ("left-subgroup", LEFT_SUBGROUP_SCENE),
    ("monitor-mix", MONITOR_MIX_SCENE),
];

const CLASSROOM_SCENE: &str = r#"
name = "Classroom"
description = "Power-on layout: gains down, every channel to main"
"#;

const ALL_MAINS_SCENE: &str = r#"
name = "All Mains"
description = "Four channels at unity gain straight to the main bus"

[[console.channels]]
gain = 1.0

[[console.channels]]
gain = 1.0

[[console.channels]]
gain = 1.0

[[console.channels]]
gain = 1.0
"#;

const LEFT_SUBGROUP_SCENE: &str = r#"
name = "Left Subgroup"
description = "Channel 1 hard left through subgroup 1 into master left"

[[console.channels]]
gain = 1.0
pan = -1.0
routing = { to_main = false, to_sub12 = true, to_sub34 = false }

[[console.channels]]

[[console.channels]]

[[console.channels]]
"#;

const MONITOR_MIX_SCENE: &str = r#"
name = "Monitor Mix"
description = "Aux sends feeding both headphone mixes, buses 3 and 4 post-fader"

[console]
aux_taps = ["pre_fader", "pre_fader", "post_fader", "post_fader"]

[[console.channels]]
gain = 0.8
pan = -0.5
aux = [0.9, 0.2, 0.6, 0.6]

[[console.channels]]
gain = 0.8
pan = 0.5
aux = [0.2, 0.9, 0.6, 0.6]

[[console.channels]]
gain = 0.6
fader = 0.5
aux = [0.5, 0.5, 0.8, 0.3]

[[console.channels]]
gain = 0.6
fader = 0.5
aux = [0.5, 0.5, 0.3, 0.8]
"#;

/// All factory scenes, in listing order.
pub fn factory_scenes() -> Vec<Scene> {
    FACTORY_SCENES_TOML
        .iter()
        .filter_map(|(_, toml)| Scene::from_toml(toml).ok())
        .collect()
}

/// Factory scene by identifier or display name, ignoring case.
///
/// ```rust
/// use edumixer_config::get_factory_scene;
///
/// let scene = get_factory_scene("Monitor-Mix").unwrap();
/// assert_eq!(scene.name, "Monitor Mix");
/// assert!(get_factory_scene("karaoke").is_none());
/// ```
pub fn get_factory_scene(name: &str) -> Option<Scene> {
    let wanted = name.to_lowercase();
    FACTORY_SCENES_TOML
        .iter()
        .filter_map(|(id, toml)| Scene::from_toml(toml).ok().map(|scene| (*id, scene)))
        .find(|(id, scene)| *id == wanted || scene.name.to_lowercase() == wanted)
        .map(|(_, scene)| scene)
}

/// Like [`get_factory_scene`], with a missing scene as an error.
pub fn factory_scene(name: &str) -> Result<Scene, ConfigError> {
    get_factory_scene(name).ok_or_else(|| ConfigError::SceneNotFound(name.to_string()))
}

/// Identifiers of all factory scenes.
pub fn factory_scene_names() -> Vec<&'static str> {
    FACTORY_SCENES_TOML.iter().map(|(name, _)| *name).collect()
}

/// True when `name` names a factory scene.
pub fn is_factory_scene(name: &str) -> bool {
    get_factory_scene(name).is_some()
}
