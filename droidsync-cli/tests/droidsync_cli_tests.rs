use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn droidsync_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("droidsync"));
    cmd.current_dir(cwd)
        .env_remove("POEDITOR_API_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path()).arg("--help").output().unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    for command in [
        "import-strings",
        "import-fastlane",
        "update-drawables",
        "languages",
        "export",
    ] {
        assert!(stdout.contains(command), "missing {} in:\n{}", command, stdout);
    }
}

#[test]
fn test_import_strings_without_token_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(res.join("values")).unwrap();
    fs::write(res.join("values/strings.xml"), "<resources/>").unwrap();

    let out = droidsync_cmd(temp_dir.path())
        .args(["import-strings", "--res-dir", res.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("Please provide a PoEditor API token"));
    // Nothing is cleaned when the import is skipped.
    assert!(res.join("values/strings.xml").exists());
}

#[test]
fn test_import_fastlane_without_token_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path())
        .args(["import-fastlane", "--project-id", "1"])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("PoEditor API token"));
}

#[test]
fn test_import_strings_without_project_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path())
        .args(["import-strings", "--api-token", "secret"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("Error: Import failed"), "stderr: {}", err);
    assert!(err.contains("Project ID not set for PoEditor"), "stderr: {}", err);
}

#[test]
fn test_token_from_environment_is_used() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path())
        .env("POEDITOR_API_TOKEN", "secret")
        .arg("import-strings")
        .output()
        .unwrap();

    // With a token the missing project id becomes the failure.
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Project ID not set"));
}

#[test]
fn test_config_file_in_working_directory_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("droidsync.toml"),
        "[poeditor]\napi_token = \"from-file\"\n",
    )
    .unwrap();

    let out = droidsync_cmd(temp_dir.path())
        .arg("import-strings")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Project ID not set"));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");
    fs::write(&config, "[poeditor\n").unwrap();

    let out = droidsync_cmd(temp_dir.path())
        .args(["--config", config.to_str().unwrap(), "update-drawables"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Invalid config file"));
}

#[test]
fn test_languages_without_token_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path())
        .args(["languages", "--project-id", "1"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("PoEditor API token not set"));
}

#[test]
fn test_export_without_token_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("fr.po");
    let out = droidsync_cmd(temp_dir.path())
        .args([
            "export",
            "--project-id",
            "1",
            "--language",
            "fr",
            "--format",
            "po",
            "--output",
            output.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("PoEditor API token not set"));
    assert!(!output.exists());
}

#[test]
fn test_update_drawables_without_synced_files_is_offline() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    fs::create_dir_all(res.join("drawable")).unwrap();
    fs::write(res.join("drawable/ic_custom.xml"), "<vector/>").unwrap();

    let out = droidsync_cmd(temp_dir.path())
        .args(["update-drawables", "--res-dir", res.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Updated 0 drawable(s)"));
}

#[test]
fn test_update_drawables_without_res_dir_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = droidsync_cmd(temp_dir.path())
        .args(["update-drawables", "--res-dir", "missing/res"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unable to detect res directory"));
}
