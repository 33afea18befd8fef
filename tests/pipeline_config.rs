// tests/pipeline_config.rs

use std::io::Write;

use tempfile::NamedTempFile;

use mpiflow::config::{load_and_validate, TaskSpec};
use mpiflow::engine::StepGraph;
use mpiflow::env::mock::MockEnv;
use mpiflow::env::OMP_NUM_THREADS;
use mpiflow::errors::MpiflowError;
use mpiflow::fs::mock::MockFileSystem;
use mpiflow::pipeline::register_pipeline;
use mpiflow_test_utils::builders::{stack_params, PipelineFileBuilder};
use mpiflow_test_utils::fake_engine::RecordingEngine;
use mpiflow_test_utils::fixtures::{default_locator, resolver, resolver_with_nodes};
use mpiflow_test_utils::init_tracing;

const PIPELINE: &str = r#"
[config]
nodes = 2

[step.encodings]
kind = "encode"
outputs = ["enc0", "enc1"]
shot_gathers = ["shot0", "shot1"]
encoding = "encoding"
eprefix = "enc"
dprefix = "dat"
nx = 100
ox = 0
dx = 10.0
ny = 1
oy = 0.0
dy = 1.0
custom = "--bind-to core"

[step.cube]
kind = "grid_and_stack"
np = 32
output = "cube"
files = ["enc0", "enc1"]
fprefix = "dat"
nf = 2
of = 0
jf = 1
nx = 100
ox = 0.0
dx = 10.0
ny = 1
oy = 0.0
dy = 1.0
nz = 250
oz = 0.0
dz = 0.004

[step.stacked]
kind = "stack"
output = "stacked"
fprefix = "shot%03d"
nf = 3
of = 10
jf = 5
"#;

fn write_pipeline(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn threads(n: &str) -> mpiflow::workers::WorkerCountResolver {
    resolver(MockEnv::new().with(OMP_NUM_THREADS, n), MockFileSystem::new())
}

#[test]
fn loads_all_step_kinds() {
    let file = write_pipeline(PIPELINE);
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.launcher, "mpiexec");
    assert_eq!(cfg.config.nodes, Some(2));
    assert_eq!(cfg.step.len(), 3);
    assert_eq!(cfg.step["cube"].np, Some(32));

    match &cfg.step["encodings"].task {
        TaskSpec::Encode(p) => {
            assert_eq!(p.ox, 0.0);
            assert_eq!(p.custom, "--bind-to core");
        }
        other => panic!("expected encode, got {other:?}"),
    }
    assert_eq!(cfg.step["stacked"].task.kind(), "stack");
}

#[test]
fn registers_every_step_with_resolved_np() {
    init_tracing();
    let file = write_pipeline(PIPELINE);
    let cfg = load_and_validate(file.path()).unwrap();
    let mut graph = StepGraph::new();

    let np = register_pipeline(&cfg, &threads("4"), &default_locator(), &mut graph, None).unwrap();

    assert_eq!(np, 8);
    assert_eq!(graph.len(), 3);
    let commands: Vec<&str> = graph.steps().iter().map(|s| s.command.as_str()).collect();
    // BTreeMap order: cube, encodings, stacked.
    assert!(commands[0].contains(" -np 32 "));
    assert!(commands[1].contains(" -np 8 --bind-to core "));
    assert!(commands[2].contains(" -np 8 "));

    let cube = graph.producer_of("cube").unwrap();
    let enc = graph.producer_of("enc0").unwrap();
    assert_eq!(graph.dependencies_of(cube), vec![enc]);
}

#[test]
fn cli_nodes_override_config_nodes() {
    let cfg = PipelineFileBuilder::new()
        .nodes(2)
        .with_step("s", TaskSpec::Stack(stack_params("out", "f%d", 1, 0, 1)))
        .build();
    let mut engine = RecordingEngine::new();

    let np = register_pipeline(&cfg, &threads("4"), &default_locator(), &mut engine, Some(5))
        .unwrap();

    assert_eq!(np, 20);
    assert!(engine.single().command.contains(" -np 20 "));
}

#[test]
fn node_file_beats_config_nodes() {
    let cfg = PipelineFileBuilder::new()
        .nodes(10)
        .with_step("s", TaskSpec::Stack(stack_params("out", "f%d", 1, 0, 1)))
        .build();
    let mut engine = RecordingEngine::new();
    let r = resolver_with_nodes("8", &["a\n", "b\n", "a\n", "c\n"]);

    let np = register_pipeline(&cfg, &r, &default_locator(), &mut engine, None).unwrap();
    assert_eq!(np, 24);
}

#[test]
fn per_step_np_is_used_verbatim() {
    let cfg = PipelineFileBuilder::new()
        .with_step_np("s", 3, TaskSpec::Stack(stack_params("out", "f%d", 1, 0, 1)))
        .build();
    let mut engine = RecordingEngine::new();

    register_pipeline(&cfg, &threads("8"), &default_locator(), &mut engine, None).unwrap();
    assert!(engine.single().command.contains(" -np 3 "));
}

#[test]
fn non_numeric_geometry_is_a_toml_error() {
    let file = write_pipeline(
        r#"
[step.s]
kind = "stack"
output = "out"
fprefix = "f%d"
nf = "three"
of = 0
jf = 1
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(MpiflowError::TomlError(_))
    ));
}

#[test]
fn unknown_kind_is_a_toml_error() {
    let file = write_pipeline(
        r#"
[step.s]
kind = "migrate"
output = "out"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(MpiflowError::TomlError(_))
    ));
}

#[test]
fn empty_pipeline_is_rejected() {
    let file = write_pipeline("[config]\nnodes = 1\n");

    match load_and_validate(file.path()) {
        Err(MpiflowError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn zero_nodes_in_config_is_rejected() {
    let file = write_pipeline(
        r#"
[config]
nodes = 0

[step.s]
kind = "stack"
output = "out"
fprefix = "f%d"
nf = 1
of = 0
jf = 1
"#,
    );

    match load_and_validate(file.path()) {
        Err(MpiflowError::ConfigError(msg)) => assert!(msg.contains("nodes")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn shared_outputs_are_rejected() {
    let file = write_pipeline(
        r#"
[step.a]
kind = "stack"
output = "out"
fprefix = "f%d"
nf = 1
of = 0
jf = 1

[step.b]
kind = "stack"
output = "out.rsf"
fprefix = "g%d"
nf = 1
of = 0
jf = 1
"#,
    );

    match load_and_validate(file.path()) {
        Err(MpiflowError::ConfigError(msg)) => assert!(msg.contains("produced by both")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        load_and_validate("/nonexistent/Mpiflow.toml"),
        Err(MpiflowError::IoError(_))
    ));
}
