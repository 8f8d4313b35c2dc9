use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "nightfall"])
        .status()
        .expect("failed to invoke cargo check for nightfall CLI binary");

    assert!(status.success(), "cargo check --bin nightfall should succeed");
}

#[test]
fn headless_run_prints_a_summary() {
    let output = Command::new(env!("CARGO_BIN_EXE_nightfall"))
        .args(["--seed", "7", "--seconds", "2", "--script", "builder"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run nightfall binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to Nightfall."));
    assert!(stdout.contains("steps:      125"));
    assert!(stdout.contains("wave:       1 (day"));
    assert!(stdout.contains("2 structures"));
}

#[test]
fn missing_config_file_is_reported() {
    let output = Command::new(env!("CARGO_BIN_EXE_nightfall"))
        .args(["--config", "/nonexistent/nightfall.toml", "--seconds", "1"])
        .output()
        .expect("failed to run nightfall binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load configuration"));
}
