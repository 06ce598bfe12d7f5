use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const USER: &str = r##"
id: api/user
$schema: http://json-schema.org/draft-04/hyper-schema
type: object
properties:
  name:
    type: string
  group:
    $ref: "#/group"
"##;

const GROUP: &str = r##"
id: api/group
$schema: http://json-schema.org/draft-04/hyper-schema
type: object
properties:
  members:
    type: array
    items:
      $ref: "#/user"
"##;

fn jhs_check(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jhs-check"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run jhs-check")
}

fn tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// Exit status
// ---------------------------------------------------------------------------

#[test]
fn test_clean_tree_exits_zero() {
    let dir = tree(&[("user.yml", USER), ("group.yml", GROUP)]);

    let output = jhs_check(&[arg(dir.path())]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_dangling_reference_exits_one() {
    let dir = tree(&[("user.yml", USER)]);

    let output = jhs_check(&[arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("referred from 'user/properties/group' to #/group but it's not found(6)"));
}

#[test]
fn test_file_fault_exits_two() {
    let dir = tree(&[("user.yml", USER), ("group.yml", GROUP), ("notes.txt", "hello")]);

    let output = jhs_check(&[arg(dir.path())]);
    assert_eq!(output.status.code(), Some(2));

    let expected = format!("{}\n  not supported file(0)\n\n", dir.path().join("notes.txt").display());
    assert_eq!(stderr(&output), expected);
}

#[test]
fn test_file_and_reference_faults_exit_three() {
    let dir = tree(&[("user.yml", USER), ("broken.yml", "id: api/broken/\n")]);

    let output = jhs_check(&[arg(dir.path())]);
    assert_eq!(output.status.code(), Some(3));

    let err = stderr(&output);
    assert!(err.contains("extra slash in ID 'api/broken/'(1)"));
    assert!(err.contains("but it's not found(6)"));
}

#[test]
fn test_missing_source_exits_four() {
    let dir = tree(&[("user.yml", USER), ("group.yml", GROUP)]);
    let missing = dir.path().join("missing");

    let output = jhs_check(&[arg(dir.path()), arg(&missing)]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("does not exist"));
}

// ---------------------------------------------------------------------------
// Pattern and configuration
// ---------------------------------------------------------------------------

#[test]
fn test_pattern_flag_skips_other_files() {
    let dir = tree(&[("user.yml", USER), ("group.yml", GROUP), ("notes.txt", "hello")]);

    let output = jhs_check(&["--pattern", r"\.yml$", arg(dir.path())]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn test_config_excludes_directories() {
    let dir = tree(&[
        ("schemas/user.yml", USER),
        ("schemas/group.yml", GROUP),
        ("schemas/drafts/broken.yml", "type: object\n"),
        ("jhs-check.yml", "exclude: [drafts]\n"),
    ]);

    let output = jhs_check(&[
        "-c",
        arg(&dir.path().join("jhs-check.yml")),
        arg(&dir.path().join("schemas")),
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn test_pattern_flag_overrides_config() {
    let dir = tree(&[
        ("schemas/user.yml", USER),
        ("schemas/group.yml", GROUP),
        ("schemas/notes.txt", "hello"),
        ("jhs-check.yml", "pattern: user\n"),
    ]);
    let config = dir.path().join("jhs-check.yml");
    let schemas = dir.path().join("schemas");

    // Only user.yml is read, so #/group dangles.
    let output = jhs_check(&["-c", arg(&config), arg(&schemas)]);
    assert_eq!(output.status.code(), Some(1));

    let output = jhs_check(&["-c", arg(&config), "-p", r"\.yml$", arg(&schemas)]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn test_unusable_inputs_exit_four() {
    let dir = tree(&[("user.yml", USER), ("bad.yml", "exclude: {nested: [}")]);

    let output = jhs_check(&["-c", arg(&dir.path().join("bad.yml")), arg(dir.path())]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).starts_with("error: Failed to load config"));

    let output = jhs_check(&["-p", "(", arg(dir.path())]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("invalid file pattern"));
    assert!(output.stdout.is_empty());
}
