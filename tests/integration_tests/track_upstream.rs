use crate::common::{TestRepo, stderr};

fn upstream(repo: &TestRepo) -> Option<String> {
    let output = repo.git_output(&["rev-parse", "--abbrev-ref", "@{u}"]);
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[test]
fn test_sets_single_candidate() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    repo.add_bare_remote("origin");
    assert_eq!(upstream(&repo), None);

    let output = repo.git_well().arg("track-upstream").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(upstream(&repo).as_deref(), Some("origin/feature"));
}

#[test]
fn test_prefers_origin_among_same_urls() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    let bare = repo.add_bare_remote("origin");
    repo.git(&["remote", "add", "backup", bare.to_str().unwrap()]);
    repo.git(&["fetch", "backup"]);

    let output = repo.git_well().arg("track-upstream").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(upstream(&repo).as_deref(), Some("origin/feature"));
}

#[test]
fn test_ambiguous_remotes_fail() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    repo.add_bare_remote("origin");
    repo.add_bare_remote("fork");

    let output = repo.git_well().arg("track-upstream").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ambiguous"));
    assert_eq!(upstream(&repo), None);
}

#[test]
fn test_existing_upstream_untouched() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "-b", "feature"]);
    repo.add_bare_remote("origin");
    repo.add_bare_remote("fork");
    repo.git(&["branch", "--set-upstream-to=fork/feature"]);

    let output = repo.git_well().arg("track-upstream").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("nothing to do"));
    assert_eq!(upstream(&repo).as_deref(), Some("fork/feature"));
}
