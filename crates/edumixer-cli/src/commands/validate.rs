//! Scene and session file checks.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use edumixer_config::{Scene, SessionConfig, ValidationError};

#[derive(Args)]
pub struct ValidateArgs {
    /// File to check
    path: PathBuf,

    /// Treat the file as a session config instead of a scene
    #[arg(long)]
    session: bool,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;

    let (label, result) = if args.session {
        let session = SessionConfig::from_toml(&text)?;
        ("session".to_string(), session.validate())
    } else {
        let scene = Scene::from_toml(&text)?;
        (format!("scene '{}'", scene.name), scene.validate())
    };

    match result {
        Ok(()) => {
            println!("{}: valid {label}", args.path.display());
            Ok(())
        }
        Err(err) => {
            println!("{}: invalid {label}", args.path.display());
            for problem in flatten(&err) {
                println!("  - {problem}");
            }
            anyhow::bail!("{} problem(s) found", flatten(&err).len())
        }
    }
}

fn flatten(err: &ValidationError) -> Vec<&ValidationError> {
    match err {
        ValidationError::Multiple(errors) => errors.iter().flat_map(flatten).collect(),
        single => vec![single],
    }
}
