// tests/task_builders.rs

use mpiflow::errors::MpiflowError;
use mpiflow::fs::mock::MockFileSystem;
use mpiflow::tasks::{encode, grid_and_stack, stack, stack_inputs};
use mpiflow::types::ExecFlags;
use mpiflow_test_utils::builders::{encode_params, grid_and_stack_params, stack_params};
use mpiflow_test_utils::fake_engine::RecordingEngine;
use mpiflow_test_utils::fixtures::{default_locator, locator, tool_env};
use mpiflow_test_utils::init_tracing;

/// Number of `key=` tokens in a rendered command.
fn occurrences(command: &str, key: &str) -> usize {
    let needle = format!("{key}=");
    command
        .split_whitespace()
        .filter(|tok| tok.starts_with(&needle))
        .count()
}

#[test]
fn encode_registers_one_step_with_encoding_first() {
    init_tracing();
    let mut engine = RecordingEngine::new();
    let params = encode_params(&["enc0", "enc1"], &["shot0", "shot1"]);

    encode(&mut engine, &default_locator(), 16, &params).unwrap();

    let step = engine.single();
    assert_eq!(step.outputs, vec!["enc0", "enc1"]);
    assert_eq!(step.inputs, vec!["encoding", "shot0", "shot1"]);
    assert_eq!(step.flags, ExecFlags::MPI);
    assert!(!step.flags.feed_stdin);
    assert!(step.flags.capture_stdout_as_log);
    assert_eq!(
        step.command,
        "/opt/mpi/bin/mpiexec -np 16 /opt/rsf/bin/sfbigmpiencode \
         eprefix=enc.rsf dprefix=dat.rsf encode=${SOURCES[0]} \
         nx=200 ox=0.000000 dx=12.500000 ny=1 oy=0.000000 dy=1.000000"
    );
}

#[test]
fn encode_keeps_existing_suffix_and_custom_flags() {
    let mut engine = RecordingEngine::new();
    let mut params = encode_params(&["enc"], &[]);
    params.eprefix = "out/enc.rsf".to_string();
    params.custom = "--oversubscribe".to_string();

    encode(&mut engine, &default_locator(), 8, &params).unwrap();

    let step = engine.single();
    assert_eq!(step.inputs, vec!["encoding"]);
    assert!(step.command.contains(" eprefix=out/enc.rsf "));
    assert!(step
        .command
        .starts_with("/opt/mpi/bin/mpiexec -np 8 --oversubscribe /opt/rsf/bin/sfbigmpiencode "));
}

#[test]
fn encode_geometry_appears_once_each() {
    let mut engine = RecordingEngine::new();
    encode(&mut engine, &default_locator(), 8, &encode_params(&["e"], &["s"])).unwrap();
    let cmd = &engine.single().command;

    for key in ["eprefix", "dprefix", "encode", "nx", "ox", "dx", "ny", "oy", "dy"] {
        assert_eq!(occurrences(cmd, key), 1, "{key} in {cmd}");
    }
    assert!(cmd.contains(" nx=200 "));
    assert!(cmd.contains(" dx=12.500000 "));
}

#[test]
fn grid_and_stack_formats_full_cube() {
    let mut engine = RecordingEngine::new();
    let params = grid_and_stack_params("stack", &["d0", "d1"]);

    grid_and_stack(&mut engine, &default_locator(), 8, &params).unwrap();

    let step = engine.single();
    assert_eq!(step.outputs, vec!["stack"]);
    assert_eq!(step.inputs, vec!["d0", "d1"]);
    assert_eq!(
        step.command,
        "/opt/mpi/bin/mpiexec -np 8 /opt/rsf/bin/sfbigmpistack \
         nx=200 ny=100 nz=500 ox=0.000000 oy=5.000000 oz=0.500000 \
         dx=12.500000 dy=25.000000 dz=0.004000 nf=2 of=0 jf=1 \
         prefix=\"dat.rsf\" oname=\"stack.rsf\""
    );

    for key in [
        "nx", "ny", "nz", "ox", "oy", "oz", "dx", "dy", "dz", "nf", "of", "jf", "prefix", "oname",
    ] {
        assert_eq!(occurrences(&step.command, key), 1, "{key}");
    }
}

#[test]
fn grid_and_stack_accepts_empty_file_list() {
    let mut engine = RecordingEngine::new();
    let params = grid_and_stack_params("stack.rsf", &[]);

    grid_and_stack(&mut engine, &default_locator(), 8, &params).unwrap();

    let step = engine.single();
    assert!(step.inputs.is_empty());
    assert!(step.command.ends_with("oname=\"stack.rsf\""));
}

#[test]
fn stack_generates_numbered_inputs() {
    let mut engine = RecordingEngine::new();
    let params = stack_params("stacked", "shot%03d", 3, 10, 5);

    stack(&mut engine, &default_locator(), 4, &params).unwrap();

    let step = engine.single();
    assert_eq!(step.inputs, vec!["shot010.rsf", "shot015.rsf", "shot020.rsf"]);
    assert_eq!(step.outputs, vec!["stacked"]);
    assert_eq!(
        step.command,
        "/opt/mpi/bin/mpiexec -np 4 /opt/rsf/bin/sfmpistack \
         nf=3 of=10 jf=5 fprefix=shot%03d.rsf oname=stacked"
    );
}

#[test]
fn stack_inputs_degenerate_counts() {
    assert!(stack_inputs("s%d", 0, 1, 1).unwrap().is_empty());
    assert!(stack_inputs("s%d", -3, 1, 1).unwrap().is_empty());
    assert_eq!(stack_inputs("s%d", 3, 5, -2).unwrap(), vec!["s5.rsf", "s3.rsf", "s1.rsf"]);
}

#[test]
fn stack_inputs_reject_oversized_width() {
    let err = stack_inputs("shot%18446744073709551000d", 1, 0, 1).unwrap_err();
    assert!(matches!(err, MpiflowError::Template(_)));
}

#[test]
fn stack_inputs_accept_precision_templates() {
    assert_eq!(
        stack_inputs("shot%.3d", 2, 9, 1).unwrap(),
        vec!["shot009.rsf", "shot010.rsf"]
    );
}

#[test]
fn stack_rejects_template_without_conversion() {
    let mut engine = RecordingEngine::new();
    let params = stack_params("stacked", "shot", 2, 0, 1);

    let err = stack(&mut engine, &default_locator(), 4, &params).unwrap_err();
    assert!(matches!(err, MpiflowError::Template(_)));
    assert!(engine.registered.is_empty());
}

#[test]
fn missing_tool_registers_nothing() {
    let fs = MockFileSystem::new();
    fs.add_executable("/opt/mpi/bin/mpiexec");
    let loc = locator(tool_env(), fs);
    let mut engine = RecordingEngine::new();

    let results = [
        encode(&mut engine, &loc, 8, &encode_params(&["e"], &["s"])),
        grid_and_stack(&mut engine, &loc, 8, &grid_and_stack_params("g", &["a"])),
        stack(&mut engine, &loc, 8, &stack_params("st", "f%d", 2, 0, 1)),
    ];

    for result in results {
        assert!(matches!(result, Err(MpiflowError::ExecutableNotFound { .. })));
    }
    assert!(engine.registered.is_empty());
}

#[test]
fn missing_launcher_registers_nothing() {
    let fs = MockFileSystem::new();
    fs.add_executable("/opt/rsf/bin/sfmpistack");
    let loc = locator(tool_env(), fs);
    let mut engine = RecordingEngine::new();

    let err = stack(&mut engine, &loc, 8, &stack_params("st", "f%d", 2, 0, 1)).unwrap_err();
    match err {
        MpiflowError::ExecutableNotFound { name, .. } => assert_eq!(name, "mpiexec"),
        other => panic!("expected ExecutableNotFound, got {other:?}"),
    }
    assert!(engine.registered.is_empty());
}

#[test]
fn engine_errors_propagate() {
    let mut engine = RecordingEngine::rejecting("engine closed");
    let err = stack(&mut engine, &default_locator(), 8, &stack_params("st", "f%d", 1, 0, 1))
        .unwrap_err();
    assert!(err.to_string().contains("engine closed"));
}
