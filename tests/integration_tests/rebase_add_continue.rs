use crate::common::{TestRepo, stderr};

/// A rebase of `feature` onto `main` stopped on a conflict in `file.txt`.
fn conflicted_rebase() -> TestRepo {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    repo.commit("file.txt", "feature\n", "Feature change");
    repo.git(&["checkout", "main"]);
    repo.commit("file.txt", "main\n", "Main change");
    repo.git(&["checkout", "feature"]);

    let output = repo.git_output(&["rebase", "main"]);
    assert!(!output.status.success(), "rebase should stop on the conflict");
    repo
}

#[test]
fn test_refuses_while_markers_remain() {
    let repo = conflicted_rebase();

    let output = repo.git_well().arg("rebase-add-continue").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("unresolved conflicts"), "{stderr}");
    assert!(stderr.contains("file.txt"), "{stderr}");
    assert!(repo.git(&["status"]).contains("rebase in progress"));
}

#[test]
fn test_adds_and_continues_after_resolution() {
    let repo = conflicted_rebase();
    std::fs::write(repo.root_path().join("file.txt"), "resolved\n").unwrap();

    let output = repo.git_well().arg("rebase-add-continue").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!repo.git(&["status"]).contains("rebase in progress"));
    assert_eq!(repo.current_branch(), "feature");
    assert_eq!(
        repo.git(&["log", "--format=%s", "-3"]),
        "Feature change\nMain change\nInitial commit"
    );
    assert_eq!(
        std::fs::read_to_string(repo.root_path().join("file.txt")).unwrap(),
        "resolved\n"
    );
}

#[test]
fn test_not_rebasing_fails() {
    let repo = TestRepo::new();

    let output = repo.git_well().arg("rebase-add-continue").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Not currently rebasing"));
}
