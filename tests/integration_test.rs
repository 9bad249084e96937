// tests/integration_test.rs
use std::path::Path;
use std::process::{Command, Output};

use git2::Repository;
use release_tags::domain::TagPattern;
use release_tags::git::{Git2Repository, GitCommand, TagSource};
use release_tags::report::report_from_source;
use release_tags::ReleaseTagsError;
use serial_test::serial;
use tempfile::TempDir;

// Helper function to setup a temporary git repo with one commit and the given tags
fn setup_test_repo(tags: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let sig = git2::Signature::now("Test User", "test@example.com")
            .expect("Could not create signature");
        let tree_id = repo
            .index()
            .expect("Could not get index")
            .write_tree()
            .expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let commit_id = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .expect("Could not create commit");
        let commit = repo
            .find_object(commit_id, None)
            .expect("Could not find commit");

        for tag in tags {
            repo.tag_lightweight(tag, &commit, false)
                .expect("Could not create tag");
        }
    }

    temp_dir
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn run_cli(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_release-tags"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute release-tags")
}

#[test]
fn test_git2_source_reports_stable_and_latest() {
    let dir = setup_test_repo(&["v1.0.0", "v1.2.0", "v1.2.0-beta", "v2.0.0-rc.1"]);
    let source = Git2Repository::open(dir.path()).unwrap();

    let report = report_from_source(&source, &TagPattern::default()).unwrap();
    assert_eq!(report.stable.text, "1.2.0");
    assert_eq!(report.latest.text, "2.0.0-rc.1");
}

#[test]
fn test_git_command_source_matches_git2_source() {
    if !git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }

    let dir = setup_test_repo(&["foo", "v1.0", "v1.0.0", "random-tag"]);
    let mut from_command = GitCommand::in_dir(dir.path()).list_tags().unwrap();
    let mut from_git2 = Git2Repository::open(dir.path())
        .unwrap()
        .list_tags()
        .unwrap();
    from_command.sort();
    from_git2.sort();
    assert_eq!(from_command, from_git2);

    let report =
        report_from_source(&GitCommand::in_dir(dir.path()), &TagPattern::default()).unwrap();
    assert_eq!(report.stable.text, "1.0.0");
    assert_eq!(report.latest.text, "1.0.0");
}

#[test]
fn test_git_command_outside_repository_fails() {
    if !git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }

    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let err = GitCommand::in_dir(&missing).list_tags().unwrap_err();
    assert!(matches!(err, ReleaseTagsError::ExternalCommand { .. }));
}

#[test]
#[serial]
fn test_git_command_uses_working_directory() {
    if !git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }

    let dir = setup_test_repo(&["v0.3.0", "v0.4.0-alpha.1"]);
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let result = report_from_source(&GitCommand::new(), &TagPattern::default());
    std::env::set_current_dir(previous).unwrap();

    let report = result.unwrap();
    assert_eq!(report.stable.text, "0.3.0");
    assert_eq!(report.latest.text, "0.4.0-alpha.1");
}

#[test]
fn test_cli_prints_two_lines() {
    let dir = setup_test_repo(&["v1.0.0", "v1.2.0", "v1.2.0-beta", "v2.0.0-rc.1"]);
    let output = run_cli(&["--backend", "libgit2"], dir.path());

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.2.0\n2.0.0-rc.1\n");
}

#[test]
fn test_cli_repo_flag() {
    let dir = setup_test_repo(&["v0.1.0", "v0.2.0"]);
    let elsewhere = TempDir::new().unwrap();
    let repo = dir.path().to_str().unwrap();
    let output = run_cli(&["--backend", "libgit2", "-C", repo], elsewhere.path());

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "0.2.0\n0.2.0\n");
}

#[test]
fn test_cli_default_backend() {
    if !git_available() {
        eprintln!("git not on PATH, skipping");
        return;
    }

    let dir = setup_test_repo(&["v1.4.0", "v1.5.0-rc.1", "nightly"]);
    let output = run_cli(&[], dir.path());

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.4.0\n1.5.0-rc.1\n");
}

#[test]
fn test_cli_is_idempotent() {
    let dir = setup_test_repo(&["v3.0.0", "v3.1.0-beta.2", "v2.0.0"]);
    let first = run_cli(&["--backend", "libgit2"], dir.path());
    let second = run_cli(&["--backend", "libgit2"], dir.path());

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_cli_no_tags_fails_silently_on_stdout() {
    let dir = setup_test_repo(&[]);
    let output = run_cli(&["--backend", "libgit2"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_only_prereleases_fails() {
    let dir = setup_test_repo(&["v0.1.0-alpha", "v0.2.0-beta"]);
    let output = run_cli(&["--backend", "libgit2"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No stable"));
}

#[test]
fn test_cli_custom_pattern() {
    let dir = setup_test_repo(&["release-1.0.0", "release-1.1.0-rc.1", "v9.0.0"]);
    let output = run_cli(
        &["--backend", "libgit2", "--pattern", "release-{version}"],
        dir.path(),
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.0.0\n1.1.0-rc.1\n");
}

#[test]
fn test_cli_bad_pattern_is_config_error() {
    let dir = setup_test_repo(&["v1.0.0"]);
    let output = run_cli(&["--pattern", "release"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_outside_repository_is_source_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let output = run_cli(
        &["--backend", "libgit2", "-C", missing.to_str().unwrap()],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-tags"));
    assert!(stdout.contains("--pattern"));
}

// Drop a loose tag ref whose name is not valid UTF-8 next to the HEAD commit
#[cfg(unix)]
fn add_non_utf8_tag(dir: &Path) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let repo = Repository::open(dir).expect("Could not open git repo");
    let head = repo
        .head()
        .expect("Could not read HEAD")
        .target()
        .expect("HEAD has no target");
    let ref_path = dir
        .join(".git")
        .join("refs")
        .join("tags")
        .join(OsStr::from_bytes(b"junk\xff"));
    std::fs::write(ref_path, format!("{}\n", head)).expect("Could not write tag ref");
}

#[cfg(unix)]
#[test]
fn test_cli_non_utf8_tag_is_ignored_by_both_backends() {
    let dir = setup_test_repo(&["v1.0.0"]);
    add_non_utf8_tag(dir.path());

    let from_git2 = run_cli(&["--backend", "libgit2"], dir.path());
    assert_eq!(from_git2.status.code(), Some(0));
    assert_eq!(String::from_utf8(from_git2.stdout).unwrap(), "1.0.0\n1.0.0\n");

    if !git_available() {
        eprintln!("git not on PATH, skipping git backend");
        return;
    }

    let from_command = run_cli(&[], dir.path());
    assert_eq!(
        from_command.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&from_command.stderr)
    );
    assert_eq!(String::from_utf8(from_command.stdout).unwrap(), "1.0.0\n1.0.0\n");
}

#[test]
fn test_cli_debug_logging_stays_off_stdout() {
    let dir = setup_test_repo(&["v1.0.0", "v1.2.0", "v1.2.0-beta", "v2.0.0-rc.1", "nightly"]);
    let output = Command::new(env!("CARGO_BIN_EXE_release-tags"))
        .args(["-v", "--backend", "libgit2"])
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .output()
        .expect("Failed to execute release-tags");

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1.2.0\n2.0.0-rc.1\n");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("skipping") && stderr.contains("nightly"),
        "expected a skipped-tag log line on stderr, got: {}",
        stderr
    );
}
