use grader::run;
use grader::settings::GradingSettings;
use marker::timeliness::{Deadline, SubmissionStatus};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use util::git_history::BotFilter;
use util::test_helpers::{has_file, setup_submission_dir};

const TASK1_ONLY: &str = r#"
class Student {
  constructor(firstName, lastName, gpa) {
    this.firstName = firstName;
    this.lastName = lastName;
    this.gpa = gpa;
  }
  get fullName() {
    return this.firstName.concat(String.fromCharCode(32), this.lastName);
  }
  updateGpa(newGpa) {
    if (newGpa >= 0 && newGpa <= 4) {
      this.gpa = newGpa;
    }
  }
}
const student = new Student(String.fromCharCode(65, 100, 97), String.fromCharCode(76, 111), 3.5);
student.updateGpa(3.9);
console.log(student.fullName);
"#;

/// Static-only settings rooted in `repo`, writing into `out`.
fn settings(repo: &Path, out: &TempDir) -> GradingSettings {
    GradingSettings {
        lab_name: "4.2 JS Advance".into(),
        student_id: "sara".into(),
        deadline: Deadline::default(),
        due_iso: "2025-09-17T23:59:00+03:00".into(),
        submission_root: repo.to_path_buf(),
        artifacts_dir: out.path().join("artifacts"),
        step_summary: Some(out.path().join("summary.md")),
        bot_filter: BotFilter::default(),
        sandbox: None,
    }
}

#[tokio::test]
async fn test_empty_repository_is_missing() {
    let repo = setup_submission_dir(&[("README.md", "# lab")]);
    let out = TempDir::new().unwrap();
    let report = run(&settings(repo.path(), &out)).await;

    assert_eq!(report.outcome.status, SubmissionStatus::Missing);
    assert!(report.write_failures.is_empty());
    let csv = fs::read_to_string(out.path().join("artifacts/grade.csv")).unwrap();
    assert_eq!(csv, "student_username,obtained_marks,total_marks,status\nsara,0,100,2\n");
    assert!(has_file(out.path(), "artifacts/feedback/README.md"));
}

#[tokio::test]
async fn test_script_linked_from_index_is_graded() {
    let repo = setup_submission_dir(&[
        (
            "index.html",
            "<html><body><script src=\"js/lab.js\"></script></body></html>",
        ),
        ("js/lab.js", TASK1_ONLY),
    ]);
    let out = TempDir::new().unwrap();
    let report = run(&settings(repo.path(), &out)).await;

    // Not a git repository, so the commit time is unknown and counts as late.
    assert_eq!(report.outcome.status, SubmissionStatus::Late);
    assert_eq!(report.outcome.tasks[0].earned, 11);
    assert_eq!(report.outcome.total, 21);
    assert_eq!(report.outcome.commit.sha, "unknown");
    assert!(report.csv.ends_with("sara,21,100,1\n"));

    let md = fs::read_to_string(out.path().join("artifacts/feedback/README.md")).unwrap();
    assert_eq!(md, report.markdown);
    assert!(md.contains("lab.js`."));
    assert!(md.contains("**21 / 100**"));
}

#[tokio::test]
async fn test_step_summary_is_appended() {
    let repo = setup_submission_dir(&[("script.js", TASK1_ONLY)]);
    let out = TempDir::new().unwrap();
    let summary = out.path().join("summary.md");
    fs::write(&summary, "previous step\n").unwrap();

    let report = run(&settings(repo.path(), &out)).await;

    let contents = fs::read_to_string(&summary).unwrap();
    assert!(contents.starts_with("previous step\n# Lab | 4.2 JS Advance | Autograding Summary"));
    assert!(contents.ends_with(&report.markdown));
}

#[tokio::test]
async fn test_unwritable_artifacts_are_reported() {
    let repo = setup_submission_dir(&[("script.js", TASK1_ONLY)]);
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("artifacts"), "not a directory").unwrap();

    let report = run(&settings(repo.path(), &out)).await;

    // Both artifact files fail; the step summary still gets written.
    assert_eq!(report.write_failures.len(), 2);
    assert!(has_file(out.path(), "summary.md"));
    assert_eq!(report.outcome.total, 21);
}
