use std::path::Path;
use std::process::{Command, Output};

const SETUP_JSON: &str = r#"{
  "materials": {"1": {"id": 1, "specs": {"type": "predefined", "predefinedId": "water_liquid"}}},
  "bodies": {"1": {"id": 1, "geometry": {"type": "sphere", "center": {"x": 0, "y": 0, "z": 0}, "radius": 5}}},
  "zones": {"1": {"id": 1, "baseId": 1, "materialId": 1, "construction": []}},
  "detectors": {"1": {"id": 1, "name": "Front Plane",
    "detectorGeometry": {"type": "plane", "point": {"x": 0, "y": 0, "z": 0}, "normal": {"x": 0, "y": 0, "z": 1}},
    "particle": {"type": "all"}, "scoring": {"type": "fluence"}}}
}"#;

fn cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shield-cli"))
        .args(args)
        .env_remove("SHIELD_CONVERTER_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn compile_then_parse_results() {
    let dir = tempfile::tempdir().unwrap();
    let setup = dir.path().join("setup.json");
    std::fs::write(&setup, SETUP_JSON).unwrap();
    let run = dir.path().join("run");

    let out = cli(&["compile", "--setup", path(&setup), "--out", path(&run)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for name in ["mat.dat", "geo.dat", "detect.dat", "beam.dat", "context.json"] {
        assert!(run.join(name).is_file(), "{name} missing");
    }
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--detectfile=detect.dat"));

    let context = std::fs::read_to_string(run.join("context.json")).unwrap();
    assert!(context.contains("front_plane0"));

    std::fs::write(run.join("front_plane0.bdo"), b"not a result").unwrap();
    let result_path = dir.path().join("result.json");
    let out = cli(&[
        "parse-results",
        "--dir",
        path(&run),
        "--context",
        path(&run.join("context.json")),
        "--output",
        path(&result_path),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let result: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&result_path).unwrap()).unwrap();
    assert!(result["errors"]["front_plane0.bdo"].is_string());
    assert_eq!(result["detectors"], serde_json::json!([]));
}

#[test]
fn invalid_setup_fails() {
    let dir = tempfile::tempdir().unwrap();
    let setup = dir.path().join("setup.json");
    std::fs::write(&setup, r#"{"beam": {"initialBaseEnergy": -1}}"#).unwrap();

    let out = cli(&["compile", "--setup", path(&setup), "--out", path(dir.path())]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("beam.initialBaseEnergy"));
}

#[test]
fn config_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conv.yaml");
    std::fs::write(&config, "geometry_title: from-env\n").unwrap();
    let setup = dir.path().join("setup.json");
    std::fs::write(&setup, SETUP_JSON).unwrap();
    let run = dir.path().join("run");

    let out = Command::new(env!("CARGO_BIN_EXE_shield-cli"))
        .args(["compile", "--setup", path(&setup), "--out", path(&run)])
        .env("SHIELD_CONVERTER_CONFIG", &config)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let geo = std::fs::read_to_string(run.join("geo.dat")).unwrap();
    assert!(geo.starts_with("    0    0          from-env\n"));
}

#[test]
fn tables_lists_particles() {
    let out = cli(&["tables", "particles"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("proton"));
    assert!(!stdout.contains("water_liquid"));
}
