//! Scene and session configuration for the edumixer console.
//!
//! - **Scenes**: named console states, loaded from and saved to TOML
//! - **Sessions**: tick rate, audio stream settings and synth voicing
//! - **Validation**: range checks with the path of every offending value
//! - **Factory scenes**: built-in scenes for common lessons
//!
//! # Example
//!
//! ```rust,no_run
//! use edumixer_config::{Scene, SessionConfig, get_factory_scene};
//!
//! let mut scene = get_factory_scene("all-mains").unwrap();
//! scene.console.master.fader = 0.6;
//! scene.name = "Quiet mains".to_string();
//! scene.save("quiet_mains.toml").unwrap();
//!
//! let session = SessionConfig::load("session.toml").unwrap();
//! println!("ticking at {} Hz", session.tick_rate_hz);
//! ```

mod error;
mod format;
mod scene;
mod session;

/// Range checks for console state and session settings.
pub mod validation;

/// Scenes bundled with the library.
pub mod factory_scenes;

pub use error::ConfigError;
pub use factory_scenes::{
    FACTORY_SCENE_NAMES, factory_scene, factory_scene_names, factory_scenes, get_factory_scene,
    is_factory_scene,
};
pub use scene::Scene;
pub use session::SessionConfig;
pub use validation::{ValidationError, ValidationResult, validate_console, validate_session};
