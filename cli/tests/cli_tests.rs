//! Integration tests for the stl2h binary.
//!
//! Each test invokes the real executable.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Two triangles sharing an edge.
const QUAD_STL: &str = r#"solid quad
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 1 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid quad
"#;

/// A facet with only two vertices.
const BAD_STL: &str = r#"solid bad
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
    endloop
  endfacet
endsolid bad
"#;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stl2h"))
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Convert a 3D mesh saved as STL format",
        ));
}

#[test]
fn test_missing_arguments() {
    cli().assert().failure().code(2);
}

#[test]
fn test_convert_success() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("// exported with stl2h\n"));
    assert!(text.contains("#define NODECOUNT 4\n"));
    assert!(text.contains("#define TRICOUNT 2\n"));
}

#[test]
fn test_same_input_and_output() {
    cli()
        .arg("-i")
        .arg("mesh.stl")
        .arg("-o")
        .arg("mesh.stl")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("same"));
}

#[test]
fn test_malformed_stl_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.stl");
    let output = dir.path().join("bad.h");
    fs::write(&input, BAD_STL).unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("STL format error"));

    assert!(!output.exists());
}

#[test]
fn test_yes_overwrites_existing_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();
    fs::write(&output, "stale").unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--yes")
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("#ifndef MESH_H"));
}

#[test]
fn test_overwrite_declined_redirects_to_new_name() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();
    fs::write(&output, "stale").unwrap();

    cli()
        .current_dir(dir.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .write_stdin("n\nother.h\n")
        .assert()
        .success();

    // Original file untouched, replacement written.
    assert_eq!(fs::read_to_string(&output).unwrap(), "stale");
    let text = fs::read_to_string(dir.path().join("other.h")).unwrap();
    assert!(text.contains("#define NODECOUNT 4\n"));
}

#[test]
fn test_overwrite_confirmed() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();
    fs::write(&output, "stale").unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .write_stdin("y\n")
        .assert()
        .success();

    assert!(fs::read_to_string(&output).unwrap().contains("#ifndef MESH_H"));
}

#[test]
fn test_verbose_prints_header() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("#ifndef MESH_H"));
}

#[test]
fn test_scale_option() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("quad.stl");
    let output = dir.path().join("quad.h");
    fs::write(&input, QUAD_STL).unwrap();

    cli()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-s")
        .arg("2.0")
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("(long)(2*PRES)"));
    // Normals stay unscaled.
    assert!(text.contains("  {(long)(0*PRES), (long)(0*PRES), (long)(1*PRES)},\n"));
}

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();

    cli()
        .arg("-i")
        .arg(dir.path().join("nope.stl"))
        .arg("-o")
        .arg(dir.path().join("out.h"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}
