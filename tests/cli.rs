use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn smartstudy(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("smartstudy").unwrap();
    cmd.env("SMARTSTUDY_HOME", home.path())
        .env_remove("SMARTSTUDY_USER")
        .env_remove("SMARTSTUDY_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn register(home: &TempDir) {
    smartstudy(home)
        .args(["user", "register", "Ada", "ada@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered"));
}

fn json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = smartstudy(home)
        .args(["--output", "json", "--user", "ada@example.com"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    smartstudy(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("study"));
}

#[test]
fn test_task_requires_active_user() {
    let home = TempDir::new().unwrap();
    smartstudy(&home)
        .args(["task", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("no active user"));
}

#[test]
fn test_duplicate_registration_fails() {
    let home = TempDir::new().unwrap();
    register(&home);
    smartstudy(&home)
        .args(["user", "register", "Ada Again", "ADA@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn test_task_lifecycle() {
    let home = TempDir::new().unwrap();
    register(&home);

    let created = json(
        &home,
        &[
            "task", "add", "Calculus set", "--due", "in 2 days", "--effort", "6", "--complexity",
            "4", "--category", "Math",
        ],
    );
    assert_eq!(created["category"], "math");
    assert_eq!(created["status"], "active");
    let score = created["priority_score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
    let id = created["id"].as_i64().unwrap().to_string();

    json(
        &home,
        &["task", "add", "Skim notes", "--due", "in 25 days", "--effort", "1", "--complexity", "1"],
    );

    let listed = json(&home, &["task", "list"]);
    assert_eq!(listed["count"], 2);
    assert_eq!(listed["items"][0]["title"], "Calculus set");

    let done = json(&home, &["task", "complete", &id]);
    assert_eq!(done["status"], "completed");
    assert!(done["completed_at"].is_string());

    let completed = json(&home, &["task", "list", "--filter", "completed"]);
    assert_eq!(completed["count"], 1);

    let summary = json(&home, &["stats", "summary"]);
    assert_eq!(summary["today_completed"], 1);
    assert_eq!(summary["streak"], 1);
    assert_eq!(summary["active_tasks"], 1);

    let deleted = json(&home, &["task", "delete", &id]);
    assert_eq!(deleted["deleted"], id.parse::<i64>().unwrap());

    smartstudy(&home)
        .args(["--user", "ada@example.com", "task", "show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_task_input() {
    let home = TempDir::new().unwrap();
    register(&home);

    smartstudy(&home)
        .args([
            "--user", "ada@example.com", "task", "add", "Essay", "--due", "tomorrow", "--effort",
            "150", "--complexity", "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));

    smartstudy(&home)
        .args([
            "--user", "ada@example.com", "task", "add", "Essay", "--due", "someday maybe",
            "--effort", "2", "--complexity", "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("due date"));

    smartstudy(&home)
        .args([
            "--user", "ada@example.com", "task", "add", "Essay", "--due", "in 3000000 days",
            "--effort", "2", "--complexity", "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("due date"));

    let listed = json(&home, &["task", "list"]);
    assert_eq!(listed["count"], 0);
}

#[test]
fn test_unknown_timezone_rejected() {
    let home = TempDir::new().unwrap();
    smartstudy(&home)
        .args(["user", "register", "Ada", "ada@example.com", "--timezone", "Not/AZone"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timezone"));
}

#[test]
fn test_heatmap_days_out_of_range() {
    let home = TempDir::new().unwrap();
    register(&home);
    smartstudy(&home)
        .args(["--user", "ada@example.com", "stats", "heatmap", "--days", "99999999"])
        .assert()
        .failure();
}

#[test]
fn test_user_from_environment() {
    let home = TempDir::new().unwrap();
    register(&home);

    smartstudy(&home)
        .env("SMARTSTUDY_USER", "ada@example.com")
        .args(["user", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"));
}

#[test]
fn test_config_default_user_and_output() {
    let home = TempDir::new().unwrap();
    register(&home);
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n  default_user: ada@example.com\n",
    )
    .unwrap();

    smartstudy(&home)
        .args(["stats", "heatmap", "--days", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_contributions\": 0"));
}

#[test]
fn test_malformed_config() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "general: [oops").unwrap();

    smartstudy(&home)
        .args(["user", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn test_stats_pretty() {
    let home = TempDir::new().unwrap();
    register(&home);

    smartstudy(&home)
        .args(["--user", "ada@example.com", "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Study Summary"));

    smartstudy(&home)
        .args(["--user", "ada@example.com", "stats", "weekly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    smartstudy(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smartstudy"));

    smartstudy(&home)
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}
