mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn qesview() -> Command {
    Command::cargo_bin("qesview").unwrap()
}

#[test]
fn ramps_lists_bundled_maps() {
    qesview()
        .arg("ramps")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cool to Warm"))
        .stdout(predicate::str::contains("Grayscale"));
}

#[test]
fn ramp_prints_resampled_hex_colors() {
    qesview()
        .args(["ramp", "Grayscale", "--samples", "5", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#000000"))
        .stdout(predicate::str::contains("#808080"))
        .stdout(predicate::str::contains("#ffffff"));
}

#[test]
fn unknown_ramp_fails() {
    qesview()
        .args(["ramp", "Nope", "--plain"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown color ramp: Nope"));
}

#[test]
fn info_summarizes_dataset() {
    let dir = common::dataset();
    qesview()
        .arg("info")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Buildings (1)"))
        .stdout(predicate::str::contains("Sensors (1)"))
        .stdout(predicate::str::contains("Timesteps (3)"))
        .stdout(predicate::str::contains("ac_temperature [aircell]"))
        .stdout(predicate::str::contains("patch samples: 33"));
}

#[test]
fn info_on_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    qesview()
        .arg("info")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn sample_reports_patch_statistics() {
    let dir = common::dataset();
    qesview()
        .arg("sample")
        .arg(dir.path())
        .args(["patch_temperature", "--timestep", "1", "--ramp", "Grayscale"])
        .assert()
        .success()
        .stdout(predicate::str::contains("patch_temperature (patch) at timestep 1"))
        .stdout(predicate::str::contains("samples: 33 (33 finite)"))
        .stdout(predicate::str::contains("building 0 face 0:"));
}

#[test]
fn sample_colors_come_from_the_ramp() {
    let dir = common::dataset();
    // Sample 0 at timestep 0 is 280 K, the variable minimum.
    qesview()
        .arg("sample")
        .arg(dir.path())
        .args(["patch_temperature", "--ramp", "Grayscale", "--show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("280.0000 ->  0.0000 #000000"))
        .stdout(predicate::str::contains("building 0 face 0: #000000 "));
}

#[test]
fn vars_lists_variables_per_visualization() {
    let dir = common::dataset();
    qesview()
        .arg("vars")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Surface shading (patch)\n    patch_temperature - Surface temperature [K]",
        ))
        .stdout(predicate::str::contains(
            "Volume (aircell)\n    ac_temperature - Air temperature [K]",
        ));
}

#[test]
fn sample_packs_aircell_volume() {
    let dir = common::dataset();
    qesview()
        .arg("sample")
        .arg(dir.path())
        .arg("ac_temperature")
        .assert()
        .success()
        .stdout(predicate::str::contains("samples: 24"))
        .stdout(predicate::str::contains("volume texture: 4 x 4 x 4"));
}

#[test]
fn sample_unknown_variable_fails() {
    let dir = common::dataset();
    qesview()
        .arg("sample")
        .arg(dir.path())
        .arg("humidity")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown variable: humidity"));
}

#[test]
fn play_runs_to_last_timestep() {
    let dir = common::dataset();
    qesview()
        .arg("play")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("timestep 1 2011-07-01 13:00:00"))
        .stdout(predicate::str::contains("timestep 2 2011-07-01 14:00:00"))
        .stdout(predicate::str::ends_with("stopped at timestep 2\n"));
}

#[test]
fn play_honours_frame_limit() {
    let dir = common::dataset();
    qesview()
        .arg("play")
        .arg(dir.path())
        .args(["--frames", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stopped at timestep 1"));
}

#[test]
fn log_file_is_written() {
    let dir = common::dataset();
    let log = dir.path().join("qesview.log");
    qesview()
        .arg("info")
        .arg(dir.path())
        .arg("--log")
        .arg(&log)
        .assert()
        .success();
    let text = std::fs::read_to_string(log).unwrap();
    assert!(text.contains("Starting qesview"));
}
