//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod levels;
pub mod map;
pub mod render;
pub mod run;
pub mod scenes;
pub mod validate;
