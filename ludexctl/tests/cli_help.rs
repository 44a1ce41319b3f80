use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn rename_help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("ludexctl");
    let output = cmd
        .arg("rename")
        .arg("--help")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    for flag in [
        "--dry-run",
        "--mode",
        "--workers",
        "--fail-fast",
        "--no-skip-canonical",
        "--config",
        "--report",
    ] {
        assert!(text.contains(flag), "rename help missing {flag}");
    }
}

#[test]
fn clean_prints_cleaned_queries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("ludexctl");
    cmd.current_dir(dir.path())
        .env_remove("LUDEX_CONFIG_PATH")
        .env_remove("LUDEX_CONFIG_JSON")
        .args(["clean", "Dead.Space.v1.2", "Warhammer.40000.SM.2-RUNE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dead.Space.v1.2 -> Dead Space\n"))
        .stdout(predicate::str::contains(
            "Warhammer.40000.SM.2-RUNE -> Warhammer 40000 SM 2\n",
        ));
}

#[test]
fn clean_requires_a_name() {
    let mut cmd = cargo_bin_cmd!("ludexctl");
    cmd.arg("clean").assert().failure();
}

#[test]
fn rename_without_credentials_fails_before_touching_folders() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("Dead.Space-RUNE")).expect("mkdir");

    let mut cmd = cargo_bin_cmd!("ludexctl");
    cmd.current_dir(dir.path())
        .env_remove("IGDB_CLIENT_ID")
        .env_remove("IGDB_CLIENT_SECRET")
        .env_remove("LUDEX_CONFIG_PATH")
        .env_remove("LUDEX_CONFIG_JSON")
        .args(["rename", "--mode", "auto-skip"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("IGDB_CLIENT_ID"));

    assert!(dir.path().join("Dead.Space-RUNE").is_dir());
}
