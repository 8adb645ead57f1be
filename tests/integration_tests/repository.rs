//! Tests for `Repository` against real git repositories.

use git_well::git::Repository;

use crate::common::TestRepo;

#[test]
fn test_remotes_and_urls() {
    let repo = TestRepo::new();
    repo.git(&["remote", "add", "origin", "https://github.com/Org/repo.git"]);
    repo.git(&[
        "remote",
        "set-url",
        "--add",
        "origin",
        "git@gitlab.com:Org/repo.git",
    ]);

    let repository = Repository::at(repo.root_path());
    assert_eq!(repository.remotes().unwrap(), vec!["origin"]);
    assert_eq!(
        repository.remote_urls("origin").unwrap(),
        vec!["https://github.com/Org/repo.git", "git@gitlab.com:Org/repo.git"]
    );
}

#[test]
fn test_config_path_from_subdirectory() {
    let repo = TestRepo::new();
    let sub = repo.root_path().join("nested");
    std::fs::create_dir(&sub).unwrap();

    let repository = Repository::at(&sub);
    assert!(repository.is_repository());
    let config = repository.config_path().unwrap();
    assert_eq!(
        dunce::canonicalize(config).unwrap(),
        repo.root_path().join(".git").join("config")
    );
}

#[test]
fn test_branch_listing() {
    let repo = TestRepo::new();
    repo.git(&["branch", "dev/0.1.0"]);
    repo.add_bare_remote("origin");

    let repository = Repository::at(repo.root_path());
    assert_eq!(repository.current_branch().unwrap().as_deref(), Some("main"));
    assert_eq!(repository.local_branches().unwrap(), vec!["dev/0.1.0", "main"]);
    let remote = repository.remote_branches().unwrap();
    assert!(remote.contains(&"origin/dev/0.1.0".to_string()));
    assert!(remote.contains(&"origin/main".to_string()));
    assert_eq!(repository.upstream_branch("main").unwrap(), None);
}

#[test]
fn test_detached_head_has_no_branch() {
    let repo = TestRepo::new();
    repo.git(&["checkout", "--detach"]);

    let repository = Repository::at(repo.root_path());
    assert_eq!(repository.current_branch().unwrap(), None);
}
