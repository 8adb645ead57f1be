use crate::common::{TestRepo, stderr};

#[test]
fn test_adds_remote_relative_to_home() {
    let repo = TestRepo::new();
    let home = repo.temp_path().to_str().unwrap().to_string();

    let output = repo
        .git_well()
        .args(["discover-remote", "workstation", "--no-test-remote", "--home", &home])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.git(&["remote", "get-url", "workstation"]),
        "workstation:repo/.git"
    );
}

#[test]
fn test_remote_name_and_cwd_override() {
    let repo = TestRepo::new();

    let output = repo
        .git_well()
        .args([
            "discover-remote",
            "me@10.0.0.2",
            "--no-test-remote",
            "--remote",
            "box",
            "--remote-cwd",
            "code/project",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        repo.git(&["remote", "get-url", "box"]),
        "me@10.0.0.2:code/project/.git"
    );
}

#[test]
fn test_repo_outside_home_fails() {
    let repo = TestRepo::new();
    let elsewhere = tempfile::tempdir().unwrap();

    let output = repo
        .git_well()
        .args(["discover-remote", "workstation", "--no-test-remote", "--home"])
        .arg(elsewhere.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("is not under home directory"));
    assert!(repo.git(&["remote"]).is_empty());
}

#[test]
fn test_outside_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = crate::common::git_well_command(dir.path())
        .args(["discover-remote", "workstation", "--no-test-remote"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Not a git repository"));
}
