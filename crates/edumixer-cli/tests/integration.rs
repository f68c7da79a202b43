//! Integration tests for the edumixer binary.

use std::process::Command;

use tempfile::tempdir;

fn edumixer_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_edumixer"))
}

fn stdout_of(args: &[&str]) -> String {
    let output = edumixer_bin()
        .args(args)
        .output()
        .expect("failed to run edumixer");
    assert!(
        output.status.success(),
        "edumixer {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn scenes_lists_every_factory_scene() {
    let stdout = stdout_of(&["scenes"]);
    for name in ["classroom", "all-mains", "left-subgroup", "monitor-mix"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn scenes_prints_toml_for_one_scene() {
    let stdout = stdout_of(&["scenes", "left-subgroup"]);
    assert!(stdout.contains("name = \"Left Subgroup\""));
    assert!(stdout.contains("to_sub12 = true"));
}

#[test]
fn levels_json_for_left_subgroup() {
    let stdout = stdout_of(&["levels", "--scene", "left-subgroup", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    let master = &value["master"];
    assert!(master["left"].as_f64().unwrap() > 0.0);
    assert_eq!(master["right"].as_f64().unwrap(), 0.0);
    assert_eq!(value["channels"].as_array().unwrap().len(), 4);
}

#[test]
fn levels_text_shows_db() {
    let stdout = stdout_of(&["levels", "--scene", "all-mains"]);
    assert!(stdout.contains("Scene: All Mains"));
    assert!(stdout.contains("dB"));
    assert!(stdout.contains("CH 4"));
}

#[test]
fn map_json_has_four_voices() {
    let stdout = stdout_of(&["map", "--scene", "all-mains", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let volumes = value["volumes"].as_array().unwrap();
    assert_eq!(volumes.len(), 4);
    for v in volumes {
        assert!(v.as_f64().unwrap() > 0.0);
    }
    assert!((value["master_volume"].as_f64().unwrap() - 0.8).abs() < 1e-6);
}

#[test]
fn validate_accepts_saved_scene_and_rejects_bad_one() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.toml");
    std::fs::write(&good, stdout_of(&["scenes", "monitor-mix"])).unwrap();
    let stdout = stdout_of(&["validate", good.to_str().unwrap()]);
    assert!(stdout.contains("valid scene"));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "name = \"Bad\"\n[console.master]\nfader = 3.0\n").unwrap();
    let output = edumixer_bin()
        .args(["validate", bad.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("master.fader"));
}

#[test]
fn run_stops_after_tick_limit() {
    let stdout = stdout_of(&["run", "--scene", "all-mains", "--ticks", "10", "--rate", "200"]);
    assert!(stdout.contains("Stopped after 10 tick(s)"), "got: {stdout}");
}

#[test]
fn render_writes_a_wav_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mains.wav");
    let stdout = stdout_of(&[
        "render",
        out.to_str().unwrap(),
        "--scene",
        "all-mains",
        "--seconds",
        "0.25",
    ]);
    assert!(stdout.contains("Wrote"));
    let bytes = std::fs::metadata(&out).unwrap().len();
    // 0.25 s of 48 kHz stereo float plus header.
    assert!(bytes > 12_000 * 2 * 4);
}
