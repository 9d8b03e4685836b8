use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_luadoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let input = std::fs::read_to_string(fixture_path("tasks.lua")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("tasks.expected.md")).unwrap();

    let assert = cmd().write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn stdin_mode_vimdoc_with_namespace() {
    let input = std::fs::read_to_string(fixture_path("tasks.lua")).unwrap();

    cmd()
        .args(["-f", "vimdoc", "-n", "custom"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("*custom.run*"))
        .stdout(predicate::str::contains("*custom.list*"));
}

#[test]
fn stdin_mode_bad_block_warns_and_continues() {
    let input = "\
---Good\nM.good = function() end\n\
---Bad\n---@param x notatype\nM.bad = function() end\n";

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("### good()"))
        .stdout(predicate::str::contains("bad").not())
        .stderr(predicate::str::contains("warning"))
        .stderr(predicate::str::contains("`bad`"));
}

#[test]
fn private_docs_never_rendered() {
    let input = std::fs::read_to_string(fixture_path("tasks.lua")).unwrap();

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("internal").not());
}

// -- file mode --

#[test]
fn file_mode_creates_markdown_file() {
    let dir = TempDir::new().unwrap();
    let expected = std::fs::read_to_string(fixture_path("tasks.expected.md")).unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), &fixture_path("tasks.lua")])
        .assert()
        .success();

    let out = std::fs::read_to_string(dir.path().join("tasks.md")).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn file_mode_vimdoc_is_framed_help_file() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args([
            "-f",
            "vimdoc",
            "-o",
            dir.path().to_str().unwrap(),
            &fixture_path("tasks.lua"),
        ])
        .assert()
        .success();

    let out = std::fs::read_to_string(dir.path().join("tasks.txt")).unwrap();
    assert!(out.starts_with("*tasks.txt*\n"));
    assert!(out.contains("*tasks-contents*"));
    assert!(out.contains("*tasks.run*"));
    assert!(out.ends_with("vim:tw=80:ts=2:ft=help:norl:syntax=help:\n"));
}

#[test]
fn file_mode_requires_output_dir() {
    cmd()
        .arg(fixture_path("tasks.lua"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

// -- splice mode --

#[test]
fn splice_mode_replaces_marked_region() {
    let mut dest = NamedTempFile::new().unwrap();
    dest.write_all(b"# Readme\n\n<!-- API -->\nstale\n<!-- /API -->\n\nFooter\n")
        .unwrap();

    cmd()
        .args([
            "--into",
            dest.path().to_str().unwrap(),
            &fixture_path("tasks.lua"),
        ])
        .assert()
        .success();

    let result = std::fs::read_to_string(dest.path()).unwrap();
    assert!(result.starts_with("# Readme\n\n<!-- API -->\n### run(name, opts)\n"));
    assert!(result.contains("<!-- /API -->\n\nFooter\n"));
    assert!(!result.contains("stale"));
}

#[test]
fn splice_mode_refreshes_toc() {
    let mut dest = NamedTempFile::new().unwrap();
    dest.write_all(
        b"# Readme\n\n<!-- TOC -->\nold toc\n<!-- /TOC -->\n\n<!-- API -->\n<!-- /API -->\n",
    )
    .unwrap();

    cmd()
        .args([
            "--into",
            dest.path().to_str().unwrap(),
            "--toc",
            &fixture_path("tasks.lua"),
        ])
        .assert()
        .success();

    let result = std::fs::read_to_string(dest.path()).unwrap();
    assert!(result.contains("- [Readme](#readme)"));
    assert!(result.contains("- [run(name, opts)](#runname-opts)"));
    assert!(!result.contains("old toc"));
}

#[test]
fn splice_mode_missing_marker_fails() {
    let mut dest = NamedTempFile::new().unwrap();
    dest.write_all(b"no markers here\n").unwrap();

    cmd()
        .args([
            "--into",
            dest.path().to_str().unwrap(),
            &fixture_path("tasks.lua"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// -- argument handling --

#[test]
fn unknown_format_fails() {
    cmd()
        .args(["-f", "html"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn output_and_into_conflict() {
    cmd()
        .args(["-o", "out", "--into", "README.md", "x.lua"])
        .assert()
        .failure();
}

#[test]
fn unmatched_glob_warns_without_failing() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args([
            "-o",
            dir.path().to_str().unwrap(),
            "no/such/dir/*.lua",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));
}
