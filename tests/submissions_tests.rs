use std::{fs, path::Path};

use oop_grader::submissions::{CanvasName, NO_JAVA_FILES, discover, parse_canvas_name};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, text).expect("write file");
}

#[test]
fn canvas_names_yield_student_and_ids() {
    assert_eq!(
        parse_canvas_name("smithjane_12345_67890_LoanAccount"),
        CanvasName {
            student_name:  "smithjane".to_string(),
            canvas_id:     "12345".to_string(),
            submission_id: "67890".to_string(),
            project_name:  "LoanAccount".to_string(),
        }
    );

    let late = parse_canvas_name("doe_john_late_111_222_PA2_final");
    assert_eq!(late.student_name, "doe_john_late");
    assert_eq!(late.canvas_id, "111");
    assert_eq!(late.project_name, "PA2_final");
}

#[test]
fn other_names_are_kept_whole() {
    let plain = parse_canvas_name("jane_doe_pa1");
    assert_eq!(plain.student_name, "jane_doe_pa1");
    assert!(plain.canvas_id.is_empty());
    assert!(plain.submission_id.is_empty());

    let one_id = parse_canvas_name("jane_123_pa1");
    assert_eq!(one_id.student_name, "jane_123_pa1");
}

#[test]
fn single_java_file_is_one_submission() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "smithjane_12345_67890_LoanAccount.java", "class LoanAccount {}");

    let found = discover(&dir.path().join("smithjane_12345_67890_LoanAccount.java"))
        .expect("discovery succeeds");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].student_name(), "smithjane");
    assert_eq!(found[0].student_id(), "12345");
}

#[test]
fn non_java_file_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "notes.txt", "hello");

    let err = discover(&dir.path().join("notes.txt")).expect_err("not a java file");
    assert!(err.to_string().contains("is not a .java file"));
}

#[test]
fn missing_path_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    assert!(discover(&dir.path().join("nowhere")).is_err());
}

#[test]
fn directory_of_java_files_is_one_submission() {
    let dir = TempDir::new().expect("temp dir");
    let student = dir.path().join("jane_doe");
    write(&student, "LoanAccount.java", "class LoanAccount {}");
    write(&student, "Main.java", "class Main {}");

    let found = discover(&student).expect("discovery succeeds");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].student_name(), "jane_doe");
    let submission = found[0].submission().expect("files were read");
    assert_eq!(submission.files().len(), 2);
}

#[test]
fn each_subdirectory_is_a_student() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "bob_2_20_pa1/LoanAccount.java", "class LoanAccount {}");
    write(dir.path(), "alice_1_10_pa1/LoanAccount.java", "class LoanAccount {}");
    write(dir.path(), "alice_1_10_pa1/Main.java", "class Main {}");
    write(dir.path(), "carol_empty/readme.txt", "nothing here");
    write(dir.path(), "__MACOSX/alice_1_10_pa1/._LoanAccount.java", "junk");

    let found = discover(dir.path()).expect("discovery succeeds");
    let names: Vec<&str> = found.iter().map(|s| s.student_name()).collect();

    assert_eq!(names, vec!["alice", "bob", "carol_empty"]);
    assert_eq!(found[0].student_id(), "1");
    let alice = found[0].submission().expect("alice has Java files");
    assert_eq!(alice.files().len(), 2);
    assert!(found[1].submission().is_some());
    assert!(found[2].submission().is_none());
}

#[test]
fn folders_without_java_files_are_still_reported() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "alice_1_10_pa1/LoanAccount.java", "class LoanAccount {}");
    write(dir.path(), "bob_333_444_PA1/submission.zip", "PK");
    write(dir.path(), ".git/HEAD", "ref: refs/heads/main");

    let found = discover(dir.path()).expect("discovery succeeds");

    assert_eq!(found.len(), 2);
    let bob = &found[1];
    assert_eq!(bob.student_name(), "bob");
    assert_eq!(bob.student_id(), "333");
    assert!(bob.submission().is_none());
    assert_eq!(bob.ungradable_reason(), Some(NO_JAVA_FILES));
    assert_eq!(found[0].ungradable_reason(), None);
}

#[test]
fn ide_projects_prefer_src_files() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "dana/src/LoanAccount.java", "class LoanAccount {}");
    write(dir.path(), "dana/bin/Backup.java", "class Backup {}");
    write(dir.path(), "dana/._Hidden.java", "junk");

    let found = discover(dir.path()).expect("discovery succeeds");

    assert_eq!(found.len(), 1);
    let files: Vec<&str> = found[0]
        .submission()
        .expect("dana has Java files")
        .files()
        .iter()
        .map(|f| f.file_name())
        .collect();
    assert_eq!(files, vec!["LoanAccount.java"]);
}

#[test]
fn folder_names_with_brackets_are_searched_literally() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "erin [late]/LoanAccount.java", "class LoanAccount {}");

    let found = discover(dir.path()).expect("discovery succeeds");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].student_name(), "erin [late]");
    let erin = found[0].submission().expect("erin has Java files");
    assert_eq!(erin.files().len(), 1);
}
