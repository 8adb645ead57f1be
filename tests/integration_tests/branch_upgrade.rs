use crate::common::{TestRepo, stderr};

#[test]
fn test_switches_to_highest_version() {
    let repo = TestRepo::new();
    for branch in ["dev/0.2.0", "dev/0.10.0", "dev/0.9.1", "dev/wip"] {
        repo.git(&["branch", branch]);
    }

    let output = repo.git_well().arg("branch-upgrade").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.current_branch(), "dev/0.10.0");
}

#[test]
fn test_already_on_latest() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "dev/1.0.0"]);

    let output = repo.git_well().arg("branch-upgrade").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Already on the latest dev branch"));
    assert_eq!(repo.current_branch(), "dev/1.0.0");
}

#[test]
fn test_checks_out_remote_only_branch() {
    let repo = TestRepo::new();
    repo.git(&["branch", "dev/0.1.0"]);
    repo.git(&["branch", "dev/1.0.0"]);
    repo.add_bare_remote("origin");
    repo.git(&["branch", "-D", "dev/1.0.0"]);

    let output = repo.git_well().arg("branch-upgrade").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.current_branch(), "dev/1.0.0");
    assert_eq!(
        repo.git(&["rev-parse", "--abbrev-ref", "dev/1.0.0@{u}"]),
        "origin/dev/1.0.0"
    );
}

#[test]
fn test_prefix_from_config() {
    let repo = TestRepo::new();
    repo.write_config("dev-branch-prefix = \"release/\"\n");
    repo.git(&["branch", "release/v2.1"]);
    repo.git(&["branch", "release/v2.0"]);
    repo.git(&["branch", "dev/9.0.0"]);

    let output = repo.git_well().arg("branch-upgrade").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(repo.current_branch(), "release/v2.1");
}

#[test]
fn test_no_versioned_branches_fails() {
    let repo = TestRepo::new();
    repo.git(&["branch", "feature"]);

    let output = repo.git_well().arg("branch-upgrade").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("No versioned branches"));
    assert_eq!(repo.current_branch(), "main");
}
