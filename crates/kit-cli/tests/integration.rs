#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn kit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kit").unwrap();
    cmd.current_dir(dir.path()).env("KIT_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    kit(dir).arg("init").assert().success();
}

fn new_feature(dir: &TempDir, slug: &str) {
    kit(dir).args(["spec", slug, "--no-branch"]).assert().success();
}

fn feature_dir(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join("docs/specs").join(name)
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.arg("--json").output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

fn phase_of(dir: &TempDir, feature: &str) -> String {
    let status = json_of(kit(dir).args(["status", feature]));
    status["phase"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// kit init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_project_layout() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    assert!(dir.path().join(".kit.yaml").is_file());
    assert!(dir.path().join("docs/specs").is_dir());
    assert!(dir.path().join("docs/CONSTITUTION.md").is_file());
    assert!(dir.path().join("AGENTS.md").is_file());
    assert!(dir.path().join("CLAUDE.md").is_file());
    assert!(dir.path().join("WARP.md").is_file());

    let cfg = std::fs::read_to_string(dir.path().join(".kit.yaml")).unwrap();
    let cfg: serde_yaml::Value = serde_yaml::from_str(&cfg).unwrap();
    assert_eq!(cfg["specs_dir"].as_str(), Some("docs/specs"));
    assert_eq!(cfg["goal_percentage"].as_u64(), Some(95));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    init_project(&dir);
}

#[test]
fn init_keeps_existing_agent_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("AGENTS.md"), "# Mine\n").unwrap();
    init_project(&dir);

    let content = std::fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
    assert_eq!(content, "# Mine\n");
}

#[test]
fn init_adds_missing_constitution_sections() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("docs")).unwrap();
    std::fs::write(
        dir.path().join("docs/CONSTITUTION.md"),
        "# CONSTITUTION\n\n## PRINCIPLES\n\nShip small.\n",
    )
    .unwrap();
    init_project(&dir);

    let content = std::fs::read_to_string(dir.path().join("docs/CONSTITUTION.md")).unwrap();
    assert!(content.contains("Ship small."));
    assert_eq!(content.matches("## PRINCIPLES").count(), 1);
    assert!(content.contains("## CONSTRAINTS"));
    assert!(content.contains("## DEFINITIONS"));
}

#[test]
fn commands_require_init() {
    let dir = TempDir::new().unwrap();
    kit(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("kit init"));
}

// ---------------------------------------------------------------------------
// kit spec / plan / tasks / analyze
// ---------------------------------------------------------------------------

#[test]
fn spec_creates_numbered_feature() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .args(["spec", "user-auth", "--no-branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0001-user-auth"));

    assert!(feature_dir(&dir, "0001-user-auth").join("SPEC.md").is_file());
    assert!(dir.path().join("docs/PROJECT_PROGRESS_SUMMARY.md").is_file());
}

#[test]
fn spec_normalizes_free_text() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "User Auth");

    assert!(feature_dir(&dir, "0001-user-auth").is_dir());
}

#[test]
fn spec_numbers_increase_and_reuse_existing() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    new_feature(&dir, "billing");
    new_feature(&dir, "auth");

    assert!(feature_dir(&dir, "0001-auth").is_dir());
    assert!(feature_dir(&dir, "0002-billing").is_dir());
    assert!(!feature_dir(&dir, "0003-auth").exists());
}

#[test]
fn spec_does_not_overwrite_existing_spec() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    let spec = feature_dir(&dir, "0001-auth").join("SPEC.md");
    std::fs::write(&spec, "# SPEC\n\nmine\n").unwrap();

    new_feature(&dir, "0001-auth");
    assert_eq!(std::fs::read_to_string(&spec).unwrap(), "# SPEC\n\nmine\n");
}

#[test]
fn spec_rejects_invalid_slug() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .args(["spec", "123-start", "--no-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid slug"));

    kit(&dir)
        .args(["spec", "one-two-three-four-five-six", "--no-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid slug"));
}

#[test]
fn plan_requires_spec_unless_forced() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::create_dir_all(feature_dir(&dir, "0001-auth")).unwrap();

    kit(&dir)
        .args(["plan", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SPEC.md not found"));

    kit(&dir).args(["plan", "auth", "--force"]).assert().success();
    assert!(feature_dir(&dir, "0001-auth").join("PLAN.md").is_file());
}

#[test]
fn tasks_requires_plan() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    kit(&dir)
        .args(["tasks", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("kit plan auth"));
}

#[test]
fn plan_for_unknown_feature_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .args(["plan", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feature 'ghost' not found"));
}

#[test]
fn analyze_writes_scratchpad() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    kit(&dir).args(["analyze", "auth"]).assert().success();
    assert!(feature_dir(&dir, "0001-auth").join("ANALYSIS.md").is_file());
    assert_eq!(phase_of(&dir, "auth"), "spec");
}

#[test]
fn scaffold_writes_every_document() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .args(["scaffold", "user-auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created feature: 0001-user-auth"));

    let feature = feature_dir(&dir, "0001-user-auth");
    for doc in ["SPEC.md", "PLAN.md", "TASKS.md", "ANALYSIS.md"] {
        assert!(feature.join(doc).is_file(), "{doc} missing");
    }
    assert_eq!(phase_of(&dir, "user-auth"), "tasks");
    assert!(dir.path().join("docs/PROJECT_PROGRESS_SUMMARY.md").is_file());
}

#[test]
fn scaffold_keeps_existing_documents() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    let spec = feature_dir(&dir, "0001-auth").join("SPEC.md");
    std::fs::write(&spec, "# SPEC\n\nmine\n").unwrap();

    let out = json_of(kit(&dir).args(["scaffold", "auth"]));
    assert_eq!(out["created"], false);
    assert_eq!(out["written"], serde_json::json!(["PLAN.md", "TASKS.md", "ANALYSIS.md"]));
    assert_eq!(std::fs::read_to_string(&spec).unwrap(), "# SPEC\n\nmine\n");
}

#[test]
fn spec_refuses_non_dash_separator() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(".kit.yaml"),
        "feature_naming:\n  numeric_width: 4\n  separator: \"_\"\n",
    )
    .unwrap();
    init_project(&dir);

    kit(&dir)
        .args(["spec", "alpha", "--no-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported feature separator"));
    assert!(!feature_dir(&dir, "0001_alpha").exists());
}

// ---------------------------------------------------------------------------
// kit list / status: phase progression
// ---------------------------------------------------------------------------

#[test]
fn list_empty_project() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No features yet"));
}

#[test]
fn list_json_sorted_by_number() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    new_feature(&dir, "billing");
    std::fs::create_dir_all(dir.path().join("docs/specs/notes")).unwrap();

    let list = json_of(kit(&dir).arg("list"));
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["dir_name"], "0001-auth");
    assert_eq!(list[1]["dir_name"], "0002-billing");
    assert_eq!(list[1]["phase"], "spec");
}

#[test]
fn list_table_shows_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    kit(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("NUMBER"))
        .stdout(predicate::str::contains("0001"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("spec"));
}

#[test]
fn status_without_features() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No features yet"));
}

#[test]
fn status_defaults_to_highest_numbered_feature() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    new_feature(&dir, "billing");

    let status = json_of(kit(&dir).arg("status"));
    assert_eq!(status["id"], "0002");
    assert_eq!(status["name"], "billing");
    assert!(status["next"].as_str().unwrap().contains("kit plan billing"));
}

#[test]
fn full_lifecycle_phases() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    let tasks = feature_dir(&dir, "0001-auth").join("TASKS.md");

    assert_eq!(phase_of(&dir, "auth"), "spec");

    kit(&dir).args(["plan", "auth"]).assert().success();
    assert_eq!(phase_of(&dir, "auth"), "plan");

    kit(&dir).args(["tasks", "auth"]).assert().success();
    assert_eq!(phase_of(&dir, "auth"), "tasks");

    std::fs::write(&tasks, "# TASKS\n\n- [x] a\n- [x] b\n- [ ] c\n- [ ] d\n- [ ] e\n").unwrap();
    assert_eq!(phase_of(&dir, "auth"), "implement");
    let status = json_of(kit(&dir).args(["status", "auth"]));
    assert_eq!(status["progress"]["total"], 5);
    assert_eq!(status["progress"]["complete"], 2);

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("3 of 5"));

    std::fs::write(&tasks, "# TASKS\n\n- [x] a\n- [X] b\n- [x] c\n- [x] d\n- [x] e\n").unwrap();
    assert_eq!(phase_of(&dir, "auth"), "reflect");

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 0001-auth complete"));
    assert_eq!(phase_of(&dir, "auth"), "complete");

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already complete"));
    let content = std::fs::read_to_string(&tasks).unwrap();
    assert_eq!(content.matches("<!-- REFLECTION_COMPLETE -->").count(), 1);
}

#[test]
fn complete_refuses_empty_task_list_unless_forced() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    kit(&dir).args(["plan", "auth"]).assert().success();
    kit(&dir).args(["tasks", "auth"]).assert().success();

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no `- [ ]` tasks"));

    kit(&dir).args(["complete", "auth", "--force"]).assert().success();
    let tasks = std::fs::read_to_string(feature_dir(&dir, "0001-auth").join("TASKS.md")).unwrap();
    assert!(tasks.contains("<!-- REFLECTION_COMPLETE -->"));
}

#[test]
fn complete_refuses_when_task_unchecked_after_marker() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    let tasks = feature_dir(&dir, "0001-auth").join("TASKS.md");
    std::fs::write(&tasks, "- [x] a\n- [x] b\n").unwrap();
    kit(&dir).args(["complete", "auth"]).assert().success();

    let content = std::fs::read_to_string(&tasks).unwrap().replace("- [x] b", "- [ ] b");
    std::fs::write(&tasks, content).unwrap();
    assert_eq!(phase_of(&dir, "auth"), "implement");

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2"));
}

#[test]
fn complete_requires_tasks_file() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    kit(&dir)
        .args(["complete", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("kit tasks auth"));
}

// ---------------------------------------------------------------------------
// kit check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_on_fresh_templates() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    kit(&dir)
        .args(["check", "auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0001-auth: ok"));
}

#[test]
fn check_fails_on_missing_sections() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    std::fs::write(feature_dir(&dir, "0001-auth").join("SPEC.md"), "# SPEC\n\n## PROBLEM\n\nx\n").unwrap();

    kit(&dir)
        .args(["check", "auth"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("'GOALS'"))
        .stdout(predicate::str::contains("'OPEN-QUESTIONS'"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn check_all_reports_every_feature() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    new_feature(&dir, "billing");

    let out = kit(&dir).args(["check", "--all", "--json"]).output().unwrap();
    assert!(out.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 2);
    assert_eq!(reports[1]["feature"], "0002-billing");
}

#[test]
fn check_without_features_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    kit(&dir)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no features to check"));
}

// ---------------------------------------------------------------------------
// kit rollup
// ---------------------------------------------------------------------------

#[test]
fn rollup_lists_features() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");
    new_feature(&dir, "billing");

    kit(&dir)
        .arg("rollup")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT_PROGRESS_SUMMARY.md"));

    let summary =
        std::fs::read_to_string(dir.path().join("docs/PROJECT_PROGRESS_SUMMARY.md")).unwrap();
    assert!(summary.contains("## FEATURE PROGRESS TABLE"));
    assert!(summary.contains("| 0001 | auth |"));
    assert!(summary.contains("### billing"));
    assert!(summary.contains("`docs/CONSTITUTION.md`"));
}

#[test]
fn custom_specs_dir_is_honoured() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".kit.yaml"), "specs_dir: specs\n").unwrap();
    init_project(&dir);
    new_feature(&dir, "auth");

    assert!(dir.path().join("specs/0001-auth/SPEC.md").is_file());
}
