mod common;

use common::{git_available, setup_docs_repo, TestEnv};

#[test]
fn test_check_outside_repository_fails() {
    let env = TestEnv::new();
    let result = env.run(&["check"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stdout.contains("repository"),
        "check should report the repository item; got:\n{}",
        result.stdout
    );
    assert!(result.stderr.contains("checks failed"));
}

#[test]
fn test_check_json_reports_each_item() {
    let env = TestEnv::new();
    let result = env.run(&["--json", "check"]);

    assert!(!result.success);
    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let repository = events
        .iter()
        .find(|e| e["event"] == "check" && e["name"] == "repository")
        .expect("repository item");
    assert_eq!(repository["status"], "error");

    let complete = events
        .iter()
        .find(|e| e["event"] == "complete")
        .expect("complete event");
    assert_eq!(complete["success"], false);
}

#[test]
fn test_check_passes_in_prepared_repository() {
    if !git_available() {
        return;
    }
    let env = TestEnv::new();
    setup_docs_repo(&env);

    let result = env.run_from(&env.project_path("repo/docs"), &["check"]);

    assert!(result.success, "check failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("docpub check"));
    assert!(result.stdout.contains("main"));
}

#[test]
fn test_check_flags_missing_publish_branch() {
    if !git_available() {
        return;
    }
    let env = TestEnv::new();
    setup_docs_repo(&env);

    let result = env.run_from(
        &env.project_path("repo/docs"),
        &["check", "--branch", "no-such-branch"],
    );

    assert!(!result.success);
    assert!(result.stdout.contains("no-such-branch"));
}
