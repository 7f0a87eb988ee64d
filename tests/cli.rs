use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const WORDS: &str = "this\nis\nsimple\nbug\ncomment\nanother\nthe\ncode\nproperly\n";

fn typoscope(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("typoscope").unwrap();
    cmd.current_dir(dir)
        .env("TYPOSCOPE_DATA_DIR", dir.join("data"))
        .env("TYPOSCOPE_PERSONAL_DIR", dir.join("personal"))
        .env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("words.txt"), WORDS).unwrap();
    typoscope(dir.path())
        .args(["dict", "build", "en_US", "words.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dictionary installed"));
    dir
}

#[test]
fn test_reports_typos_and_fails() {
    let dir = workspace();
    fs::write(dir.path().join("file.py"), "x = 1  # This is a smple bug\n").unwrap();

    typoscope(dir.path())
        .args(["file.py", "--no-color", "--suggest"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("smple → simple"));
}

#[test]
fn test_json_output_shape() {
    let dir = workspace();
    fs::write(dir.path().join("file.py"), "# This is a smple bug\n").unwrap();

    let output = typoscope(dir.path())
        .args(["file.py", "--format", "json", "--no-fail"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["typos"]["file.py"], serde_json::json!(["smple"]));
    assert_eq!(json["total_typos"], 1);
}

#[test]
fn test_fix_rewrites_file() {
    let dir = workspace();
    let file = dir.path().join("file.py");
    fs::write(&file, "# This is a smple bug\nsmple = 2\n").unwrap();

    typoscope(dir.path())
        .args(["file.py", "--fix", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 correction applied to 1 file"));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "# This is a simple bug\nsmple = 2\n"
    );
}

#[test]
fn test_prose_directory_with_exclusions() {
    let dir = workspace();
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("nested")).unwrap();
    fs::write(docs.join("nested").join("foo.rst"), "The cdoe is proply GitHub\n").unwrap();
    fs::write(docs.join("skip.py"), "# zzword\n").unwrap();

    typoscope(dir.path())
        .args([
            "docs",
            "--ext",
            "rst",
            "--recursive",
            "--exclude-word",
            "GitHub",
            "--no-color",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("cdoe"))
        .stdout(predicate::str::contains("proply"))
        .stdout(predicate::str::contains("GitHub").not())
        .stdout(predicate::str::contains("zzword").not());
}

#[test]
fn test_clean_file_succeeds() {
    let dir = workspace();
    fs::write(dir.path().join("clean.py"), "# this is the code\n").unwrap();

    typoscope(dir.path())
        .args(["clean.py", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No typos found"));
}

#[test]
fn test_missing_dictionary_is_an_error() {
    let dir = workspace();
    fs::write(dir.path().join("file.py"), "# smple\n").unwrap();

    typoscope(dir.path())
        .args(["file.py", "--language", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'xx' is not installed"));
}

#[test]
fn test_personal_dictionary_commands() {
    let dir = workspace();
    fs::write(dir.path().join("file.py"), "# serde bug\n").unwrap();

    typoscope(dir.path())
        .args(["dict", "add", "serde"])
        .assert()
        .success();

    typoscope(dir.path())
        .args(["file.py", "--no-color"])
        .assert()
        .success();

    typoscope(dir.path())
        .args(["dict", "remove", "serde", "bug"])
        .assert()
        .success();

    typoscope(dir.path())
        .args(["file.py", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("serde"))
        .stdout(predicate::str::contains("bug"));
}

#[test]
fn test_dict_list() {
    let dir = workspace();
    typoscope(dir.path())
        .args(["dict", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en_US"));
}

#[test]
fn test_local_config_file() {
    let dir = workspace();
    fs::write(
        dir.path().join(".typoscope.toml"),
        "marker = \"//\"\nexclude_words = [\"zzword\"]\n",
    )
    .unwrap();
    fs::write(dir.path().join("main.py"), "# smple\n// zzword cdoe\n").unwrap();

    typoscope(dir.path())
        .args(["main.py", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("cdoe"))
        .stdout(predicate::str::contains("smple").not())
        .stdout(predicate::str::contains("zzword").not());
}

#[test]
fn test_configured_suggestion_limit_is_shown_in_full() {
    let dir = workspace();
    fs::write(
        dir.path().join("short.txt"),
        "bat\ncat\neat\nfat\nhat\nmat\nrat\n",
    )
    .unwrap();
    typoscope(dir.path())
        .args(["dict", "build", "en_GB", "short.txt"])
        .assert()
        .success();
    fs::write(dir.path().join(".typoscope.toml"), "max_suggestions = 7\n").unwrap();
    fs::write(dir.path().join("file.py"), "# xat\n").unwrap();

    typoscope(dir.path())
        .args(["file.py", "--language", "en_GB", "--suggest", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "xat → bat, cat, eat, fat, hat, mat, rat",
        ));
}

#[test]
fn test_all_caps_typos_are_reported() {
    let dir = workspace();
    fs::write(dir.path().join("file.py"), "# This is a SMPLE bug\n").unwrap();

    typoscope(dir.path())
        .args(["file.py", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("SMPLE"));
}
