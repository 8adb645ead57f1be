use insta::assert_snapshot;
use rstest::rstest;

use crate::common::{git_well_command, stderr, stdout};

#[test]
fn test_url_prints_json_record() {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "https://github.com/Org/repo.git"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r#"
    {
      "host": "github.com",
      "group": "Org",
      "repo_name": "repo",
      "repo_endpoint": "repo.git",
      "user": null,
      "protocol": "https",
      "url": "https://github.com/Org/repo.git"
    }
    "#);
}

#[rstest]
#[case("host", "github.com")]
#[case("group", "Org")]
#[case("repo_name", "repo")]
#[case("repo_endpoint", "repo.git")]
#[case("protocol", "git")]
#[case("user", "git")]
fn test_url_component(#[case] component: &str, #[case] expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "git@github.com:Org/repo.git", component])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), format!("{expected}\n"));
}

#[test]
fn test_url_absent_user_prints_empty_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "https://github.com/Org/repo", "user"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "\n");
}

#[rstest]
#[case("git", "git@github.com:Org/repo.git")]
#[case("https", "https://github.com/Org/repo.git")]
#[case("ssh", "ssh://github.com/Org/repo.git")]
fn test_url_protocol_conversion(#[case] protocol: &str, #[case] expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "https://github.com/Org/repo", "url", "--protocol", protocol])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), expected);
}

#[test]
fn test_url_unsupported_protocol_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "https://github.com/Org/repo", "--protocol", "ftp"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unsupported protocol \"ftp\""));
}

#[test]
fn test_url_unrecognized_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = git_well_command(dir.path())
        .args(["url", "/srv/git/repo"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Unrecognized git remote URL: \"/srv/git/repo\""));
}
