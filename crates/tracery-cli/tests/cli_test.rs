use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn snapshot(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("snapshots").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn stdout_of(args: &[&str]) -> String {
    let exe = assert_cmd::cargo_bin!("tracery-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args(args)
        .output()
        .expect("run tracery-cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

#[test]
fn cli_renders_svg_overlay_to_stdout() {
    let fixture = snapshot("home.json");
    let svg = stdout_of(&["render", fixture.to_string_lossy().as_ref()]);
    assert!(svg.starts_with("<svg"), "unexpected output: {svg}");
    assert!(svg.contains(r#"id="decorative-lines""#));
    assert_eq!(svg.matches("<path ").count(), 6);
    assert!(svg.contains(r#"d="M 72 0 L 72 1263 L 1277.328125 1263""#));
}

#[test]
fn cli_prints_paths_as_json_by_default() {
    let fixture = snapshot("home.json");
    let text = stdout_of(&[fixture.to_string_lossy().as_ref()]);
    let value: serde_json::Value = serde_json::from_str(&text).expect("json output");
    assert_eq!(value["visible"], true);
    assert_eq!(value["paths"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["paths"][4]["section_id"], "faq");
    assert_eq!(value["paths"][4]["d"], "M 40 0 L 40 4475 L 945.25341796875 4475");
}

#[test]
fn cli_resolve_reports_breakpoint_state() {
    let fixture = snapshot("home-narrow.json");
    let text = stdout_of(&["resolve", "--pretty", fixture.to_string_lossy().as_ref()]);
    let value: serde_json::Value = serde_json::from_str(&text).expect("json output");
    assert_eq!(value["overlay_visible"], false);
    assert!(value["geometries"].is_array());
}

#[test]
fn cli_reads_snapshot_from_stdin() {
    let fixture = fs::read(snapshot("home.json")).expect("read fixture");
    let exe = assert_cmd::cargo_bin!("tracery-cli");
    let output = assert_cmd::Command::new(exe)
        .current_dir(repo_root())
        .args(["paths", "-"])
        .write_stdin(fixture)
        .output()
        .expect("run tracery-cli");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["paths"].as_array().map(Vec::len), Some(6));
}

#[test]
fn cli_writes_svg_to_out_path_with_overrides() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("overlay.svg");
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{"stroke_width": 3, "opacity": 1}"#).expect("write config");

    let exe = assert_cmd::cargo_bin!("tracery-cli");
    Command::new(exe)
        .current_dir(repo_root())
        .args([
            "render",
            "--config",
            config.to_string_lossy().as_ref(),
            "--id",
            "lines",
            "--out",
            out.to_string_lossy().as_ref(),
            snapshot("home.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let svg = fs::read_to_string(&out).expect("read svg");
    assert!(svg.contains(r#"id="lines""#));
    assert!(svg.contains(r#"stroke-width="3""#));
}

#[test]
fn cli_require_all_fails_on_skipped_sections() {
    let fixture = snapshot("home-partial.json");
    let exe = assert_cmd::cargo_bin!("tracery-cli");
    let output = Command::new(exe)
        .current_dir(repo_root())
        .args(["paths", "--require-all", fixture.to_string_lossy().as_ref()])
        .output()
        .expect("run tracery-cli");
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("services"));
}

#[test]
fn cli_rejects_bad_usage_and_bad_input() {
    let exe = assert_cmd::cargo_bin!("tracery-cli");
    Command::new(exe)
        .args(["render", "--bogus"])
        .assert()
        .code(2);

    let fixture = snapshot("home.json");
    for command in ["paths", "resolve"] {
        let exe = assert_cmd::cargo_bin!("tracery-cli");
        Command::new(exe)
            .args([command, "--id", "lines", fixture.to_string_lossy().as_ref()])
            .assert()
            .code(2);
    }

    let tmp = tempfile::tempdir().expect("tempdir");
    let broken = tmp.path().join("broken.json");
    fs::write(&broken, "{ not json").expect("write");
    let exe = assert_cmd::cargo_bin!("tracery-cli");
    Command::new(exe)
        .args(["paths", broken.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}
