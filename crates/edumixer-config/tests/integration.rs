//! Scene and session files driving the console end to end.

use edumixer_config::{
    ConfigError, Scene, SessionConfig, factory_scene, factory_scenes, validate_console,
};
use edumixer_core::{Scheduler, map_parameters};
use edumixer_synth::PolySynth;
use tempfile::tempdir;

#[test]
fn factory_scenes_survive_save_and_load() {
    let dir = tempdir().unwrap();
    for scene in factory_scenes() {
        let path = dir.path().join(format!("{}.toml", scene.name));
        scene.save(&path).unwrap();
        assert_eq!(Scene::load(&path).unwrap(), scene);
    }
}

#[test]
fn session_and_scene_drive_the_synth() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.toml");
    std::fs::write(
        &path,
        r#"
        tick_rate_hz = 30.0
        sample_rate = 44100

        [synth]
        headroom = 0.2
        smoothing_ms = 5.0
        "#,
    )
    .unwrap();
    let session = SessionConfig::load(&path).unwrap();
    let scene = factory_scene("all-mains").unwrap();

    let mut scheduler = Scheduler::new(PolySynth::new(
        session.sample_rate as f32,
        session.synth,
    ));
    scheduler.power_on().unwrap();
    scheduler.tick(&scene.console);
    scheduler.backend_mut().settle();

    let params = map_parameters(&scene.console);
    for (i, volume) in params.volumes.iter().enumerate() {
        let voice = scheduler.backend().voice(i).unwrap();
        assert!((voice.gain() - volume * session.synth.headroom).abs() < 1e-6);
    }
    assert!((scheduler.backend().master_gain() - params.master_volume).abs() < 1e-6);
}

#[test]
fn invalid_session_file_names_the_field() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "tick_rate_hz = -5.0\nbuffer_size = 4\n").unwrap();

    let Err(ConfigError::Validation(err)) = SessionConfig::load(&path) else {
        panic!("expected a validation error");
    };
    assert_eq!(err.paths(), vec!["tick_rate_hz", "buffer_size"]);
}

#[test]
fn edited_scene_is_revalidated() {
    let mut scene = factory_scene("monitor-mix").unwrap();
    scene.console.channels[1].aux[2] = -0.5;
    let err = validate_console(&scene.console).unwrap_err();
    assert_eq!(err.paths(), vec!["channels[1].aux[2]"]);
    assert!(err.to_string().contains("out of range"));
}
