// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use wavedag::config::{ConfigFile, load_and_validate, load_from_path};
use wavedag::dag::{Dag, Status};
use wavedag::errors::WavedagError;
use wavedag::types::ExecutorKind;
use wavedag_test_utils::builders::{ConfigFileBuilder, VertexConfigBuilder};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_vertices_defaults_and_edges() {
    let file = write_config(
        r#"
[config]
executor = "coin_flip"

[default]
can_fail = true
repetitions = 2

[vertex.A]

[vertex.B]
after = ["A"]
repetitions = 5

[vertex.C]
after = ["A", "B"]
can_fail = false
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid config");
    assert_eq!(cfg.config.executor, ExecutorKind::CoinFlip);

    let dag = Dag::from_config(&cfg).expect("acyclic");
    assert_eq!(dag.len(), 3);
    assert_eq!(dag.get("A").unwrap().repetition_count(), 2);
    assert!(dag.get("A").unwrap().may_fail());
    assert_eq!(dag.get("B").unwrap().repetition_count(), 5);
    assert!(!dag.get("C").unwrap().may_fail());
    assert_eq!(dag.parents_of("C"), ["A".to_string(), "B".to_string()]);
    assert_eq!(dag.children_of("A"), ["B".to_string(), "C".to_string()]);
    assert_eq!(dag.status(), Status::Pending);
    assert!(!dag.is_started());
}

#[test]
fn executor_defaults_to_command() {
    let file = write_config(
        r#"
[vertex.A]
cmd = "echo A"
"#,
    );

    let cfg = load_and_validate(file.path()).expect("valid config");
    assert_eq!(cfg.config.executor, ExecutorKind::Command);
    assert_eq!(cfg.vertex["A"].cmd.as_deref(), Some("echo A"));
}

#[test]
fn cycle_returns_structured_error() {
    let file = write_config(
        r#"
[vertex.A]
cmd = "echo A"
after = ["B"]

[vertex.B]
cmd = "echo B"
after = ["A"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(WavedagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains('A') || msg.contains('B'));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_dependency_returns_config_error() {
    let file = write_config(
        r#"
[vertex.A]
cmd = "echo A"
after = ["NonExistent"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(WavedagError::ConfigError(msg)) => {
            assert!(msg.contains("unknown dependency"));
            assert!(msg.contains("NonExistent"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn self_dependency_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_vertex("A", VertexConfigBuilder::new("echo A").after("A").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(WavedagError::ConfigError(msg)) => assert!(msg.contains("itself")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn zero_repetitions_are_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_vertex("A", VertexConfigBuilder::new("echo A").repetitions(0).build())
        .raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(WavedagError::ConfigError(_))
    ));

    let raw = ConfigFileBuilder::new()
        .with_default_repetitions(0)
        .with_vertex("A", VertexConfigBuilder::new("echo A").build())
        .raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(WavedagError::ConfigError(_))
    ));
}

#[test]
fn command_executor_requires_a_cmd_per_vertex() {
    let raw = ConfigFileBuilder::new()
        .with_vertex("A", VertexConfigBuilder::bare().build())
        .raw();
    match ConfigFile::try_from(raw) {
        Err(WavedagError::ConfigError(msg)) => assert!(msg.contains("no `cmd`")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }

    let cfg = ConfigFileBuilder::new()
        .with_executor(ExecutorKind::CoinFlip)
        .with_vertex("A", VertexConfigBuilder::bare().build())
        .build();
    assert_eq!(cfg.vertex.len(), 1);
}

#[test]
fn empty_config_is_rejected() {
    let file = write_config("");
    assert!(load_from_path(file.path()).is_ok());
    assert!(matches!(
        load_and_validate(file.path()),
        Err(WavedagError::ConfigError(_))
    ));
}

#[test]
fn invalid_executor_is_a_toml_error() {
    let file = write_config(
        r#"
[config]
executor = "teleport"
"#,
    );
    assert!(matches!(
        load_from_path(file.path()),
        Err(WavedagError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/Wavedag.toml"),
        Err(WavedagError::IoError(_))
    ));
}

#[test]
fn builder_defaults_flow_into_the_graph() {
    let cfg = ConfigFileBuilder::new()
        .with_default_can_fail(true)
        .with_default_repetitions(3)
        .with_vertex("A", VertexConfigBuilder::new("true").build())
        .with_vertex("B", VertexConfigBuilder::new("true").after("A").can_fail(false).repetitions(1).build())
        .build();

    let dag = Dag::from_config(&cfg).unwrap();
    assert!(dag.get("A").unwrap().may_fail());
    assert_eq!(dag.get("A").unwrap().repetition_count(), 3);
    assert!(!dag.get("B").unwrap().may_fail());
    assert_eq!(dag.get("B").unwrap().repetition_count(), 1);
    assert_eq!(dag.roots(), vec!["A"]);
}
