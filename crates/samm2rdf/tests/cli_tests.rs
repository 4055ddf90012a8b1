//! CLI integration tests.
//!
//! These tests invoke the `samm2rdf` binary via `std::process::Command`
//! against the Turtle fixtures and verify the written documents.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the built binary (set by cargo test).
fn binary_path() -> PathBuf {
    // `cargo test` places the test binary next to the main binary
    let mut path = std::env::current_exe()
        .expect("current_exe")
        .parent()
        .expect("parent")
        .parent()
        .expect("grandparent")
        .to_path_buf();
    path.push("samm2rdf");
    path
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .output()
        .expect("failed to execute binary")
}

fn run_ok(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "samm2rdf failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("invalid UTF-8")
}

#[test]
fn format_writes_canonical_turtle() {
    let movement = fixture_path("Movement.ttl");
    let stdout = run_ok(&["--mode", "format", movement.to_str().unwrap(), "-q"]);

    assert!(stdout.starts_with("@prefix : <urn:samm:com.example:1.0.0#> .\n"));
    assert!(stdout.contains("@prefix xsd: <http://www.w3.org/2001/XMLSchema#> ."));
    assert!(stdout.contains(":Movement a samm:Aspect ;"), "{stdout}");
    assert!(stdout.contains("samm:operations () ."), "{stdout}");
}

#[test]
fn sync_with_shared_file() {
    let movement = fixture_path("Movement.ttl");
    let shared = fixture_path("Shared.ttl");
    let stdout = run_ok(&[movement.to_str().unwrap(), shared.to_str().unwrap(), "-q"]);

    assert!(stdout.contains("samm:dataType shared:Position ."), "{stdout}");
    assert!(!stdout.contains("shared:Position a"), "{stdout}");
    assert!(!stdout.contains("latitude"), "{stdout}");
}

#[test]
fn output_file_and_check() {
    let dir = tempfile::tempdir().unwrap();
    let formatted = dir.path().join("Movement.ttl");
    let movement = fixture_path("Movement.ttl");

    let stdout = run_ok(&[
        "--mode",
        "format",
        movement.to_str().unwrap(),
        "-o",
        formatted.to_str().unwrap(),
        "-q",
    ]);
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&formatted).unwrap();
    assert!(written.contains(":Movement a samm:Aspect"));

    // Formatted output is stable.
    run_ok(&["--mode", "format", "--check", formatted.to_str().unwrap(), "-q"]);

    // The hand-written fixture is not.
    let output = run(&["--mode", "format", "--check", movement.to_str().unwrap(), "-q"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not canonically formatted"));
}

#[test]
fn language_option_rewrites_example_values() {
    let movement = fixture_path("Movement.ttl");
    let stdout = run_ok(&[
        "--mode",
        "format",
        "--language",
        "de",
        movement.to_str().unwrap(),
        "-q",
    ]);
    assert!(stdout.contains("samm:exampleValue \"fast\"@de"), "{stdout}");
    assert!(stdout.contains("samm:preferredName \"movement\"@en"), "{stdout}");
}

#[test]
fn settings_file_provides_language() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, r#"{ "language": "fr" }"#).unwrap();
    let movement = fixture_path("Movement.ttl");

    let stdout = run_ok(&[
        "--mode",
        "format",
        "--settings",
        settings.to_str().unwrap(),
        movement.to_str().unwrap(),
        "-q",
    ]);
    assert!(stdout.contains("samm:exampleValue \"fast\"@fr"), "{stdout}");
}

#[test]
fn settings_version_applies_to_new_documents() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(&settings, r#"{ "sammVersion": "2.0.0" }"#).unwrap();
    let empty = dir.path().join("New.ttl");
    std::fs::write(&empty, "").unwrap();
    let movement = fixture_path("Movement.ttl");

    let stdout = run_ok(&[
        "--settings",
        settings.to_str().unwrap(),
        empty.to_str().unwrap(),
        "-q",
    ]);
    assert!(
        stdout.contains("@prefix samm: <urn:samm:org.eclipse.esmf.samm:meta-model:2.0.0#> ."),
        "{stdout}"
    );

    // A document that declares its version keeps it.
    let stdout = run_ok(&[
        "--mode",
        "format",
        "--settings",
        settings.to_str().unwrap(),
        movement.to_str().unwrap(),
        "-q",
    ]);
    assert!(stdout.contains("meta-model:2.1.0#"), "{stdout}");
}

#[test]
fn stats_prints_sync_report() {
    let movement = fixture_path("Movement.ttl");
    let shared = fixture_path("Shared.ttl");
    let output = run(&["--stats", movement.to_str().unwrap(), shared.to_str().unwrap()]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"skipped_external\""), "{stderr}");
    assert!(stderr.contains("urn:samm:com.example.shared:1.0.0#Position"), "{stderr}");
    assert!(stderr.contains("Wrote"), "{stderr}");
}

#[test]
fn quiet_suppresses_summary() {
    let movement = fixture_path("Movement.ttl");
    let output = run(&["--mode", "format", movement.to_str().unwrap(), "-q"]);
    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Wrote"));
}

#[test]
fn missing_input_fails() {
    let output = run(&["/nonexistent/Movement.ttl"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}
