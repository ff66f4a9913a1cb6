// Command-line tests for the luasurface binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture_root() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/ccad")
        .to_string_lossy()
        .to_string()
}

/// Command running in an empty working directory (no luasurface.toml)
fn luasurface(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("luasurface").unwrap();
    cmd.current_dir(cwd.path());
    cmd
}

#[test]
fn test_missing_roots_is_usage_error() {
    let cwd = TempDir::new().unwrap();
    luasurface(&cwd)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--roots"));
}

#[test]
fn test_prints_json_without_outputs() {
    let cwd = TempDir::new().unwrap();
    let output = luasurface(&cwd)
        .args(["--roots", &fixture_root()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["lua_modules"]["util"], serde_json::json!(["clamp", "lerp"]));
    assert!(json["usertypes"]["Shape"]["methods"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("toMesh")));
}

#[test]
fn test_writes_both_outputs() {
    let cwd = TempDir::new().unwrap();
    let stub = cwd.path().join("types/core.d.lua");
    let json = cwd.path().join("build/api.json");

    luasurface(&cwd)
        .args(["--roots", &fixture_root()])
        .arg("--out-dlua")
        .arg(&stub)
        .arg("--out-json")
        .arg(&json)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Wrote {}", stub.display())))
        .stdout(predicate::str::contains(format!("Wrote {}", json.display())))
        .stdout(predicate::str::contains("\"globals\"").not());

    let stub_text = fs::read_to_string(&stub).unwrap();
    assert!(stub_text.starts_with("---@meta\n---@module \"ccad.generated\"\n"));
    assert!(stub_text.contains("function box(...) end"));

    let json_text = fs::read_to_string(&json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    assert_eq!(value["lua_globals"], serde_json::json!(["make_gear", "round"]));
}

#[test]
fn test_module_name_flag() {
    let cwd = TempDir::new().unwrap();
    let stub = cwd.path().join("api.d.lua");

    luasurface(&cwd)
        .args(["--roots", &fixture_root(), "--module-name", "game.api"])
        .arg("--out-dlua")
        .arg(&stub)
        .assert()
        .success();

    let text = fs::read_to_string(&stub).unwrap();
    assert!(text.contains("---@module \"game.api\"\n"));
}

#[test]
fn test_config_file_in_working_directory() {
    let cwd = TempDir::new().unwrap();
    fs::write(
        cwd.path().join("luasurface.toml"),
        "[output]\nmodule_name = \"from.config\"\n",
    )
    .unwrap();
    let stub = cwd.path().join("api.d.lua");

    luasurface(&cwd)
        .args(["--roots", &fixture_root()])
        .arg("--out-dlua")
        .arg(&stub)
        .assert()
        .success();
    assert!(fs::read_to_string(&stub).unwrap().contains("---@module \"from.config\""));

    luasurface(&cwd)
        .args(["--roots", &fixture_root(), "--module-name", "from.flag"])
        .arg("--out-dlua")
        .arg(&stub)
        .assert()
        .success();
    assert!(fs::read_to_string(&stub).unwrap().contains("---@module \"from.flag\""));
}

#[test]
fn test_nonexistent_root_succeeds_with_empty_model() {
    let cwd = TempDir::new().unwrap();
    let output = luasurface(&cwd)
        .args(["--roots", "does/not/exist"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["globals"], serde_json::json!([]));
    assert_eq!(json["lua_modules"], serde_json::json!({}));
}

#[test]
fn test_unwritable_output_fails() {
    let cwd = TempDir::new().unwrap();
    luasurface(&cwd)
        .args(["--roots", &fixture_root()])
        .arg("--out-json")
        .arg(cwd.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Failed to write"));
}

#[test]
fn test_invalid_glob_root_fails() {
    let cwd = TempDir::new().unwrap();
    luasurface(&cwd)
        .args(["--roots", "src/[.cpp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Glob pattern error"));
}
