use std::collections::BTreeMap;

use executer::config::{ConfigFile, ConfigSection, RawConfigFile};
use executer::dispatch::{build_plan, Plan};
use executer::errors::ExecuterError;
use executer::fs::mock::MockFileSystem;
use executer_test_utils::builders::DispatchRequestBuilder;

fn commands(plan: &Plan) -> Vec<(String, Vec<String>, bool)> {
    plan.steps
        .iter()
        .map(|s| (s.program.clone(), s.args(), s.is_compile_step))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn python_runs_with_interpreter_flags_before_source() {
    let fs = MockFileSystem::new();
    let req = DispatchRequestBuilder::new("main.py")
        .compile_args(&["-O"])
        .run_args(&["a", "b"])
        .measure_time()
        .build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![(
            "python3".to_string(),
            strings(&["-O", "/work/main.py", "a", "b"]),
            false
        )]
    );
    assert!(plan.steps[0].measure_elapsed_time);
}

#[test]
fn python_only_compile_checks_syntax() {
    let fs = MockFileSystem::new();
    let req = DispatchRequestBuilder::new("main.py")
        .run_args(&["ignored"])
        .only_compile()
        .build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![(
            "python3".to_string(),
            strings(&["-m", "py_compile", "/work/main.py"]),
            true
        )]
    );
}

#[test]
fn java_only_compile_has_nothing_to_do() {
    let fs = MockFileSystem::new();
    let req = DispatchRequestBuilder::new("Main.java").only_compile().build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn c_compiles_then_runs_the_output() {
    let fs = MockFileSystem::new();
    let req = DispatchRequestBuilder::new("prog/hello.c")
        .compile_args(&["-O2", "-Wall"])
        .run_args(&["x"])
        .build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![
            (
                "gcc".to_string(),
                strings(&["-o", "/work/prog/hello", "-O2", "-Wall", "/work/prog/hello.c"]),
                true
            ),
            ("/work/prog/hello".to_string(), strings(&["x"]), false),
        ]
    );
    assert_eq!(plan.steps[0].compile_error_exit_code, 100);
}

#[test]
fn go_build_flag_precedes_output_and_source() {
    let fs = MockFileSystem::new();

    let compile_only = DispatchRequestBuilder::new("main.go").only_compile().build();
    let plan = build_plan(&compile_only, &ConfigFile::default(), &fs).unwrap();
    assert_eq!(
        commands(&plan),
        vec![(
            "go".to_string(),
            strings(&["build", "-o", "/work/main", "/work/main.go"]),
            true
        )]
    );

    let execute_only = DispatchRequestBuilder::new("main.go").only_execute().build();
    let plan = build_plan(&execute_only, &ConfigFile::default(), &fs).unwrap();
    assert_eq!(
        commands(&plan),
        vec![("/work/main".to_string(), vec![], false)]
    );
}

#[test]
fn cargo_main_rs_runs_with_manifest() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/Cargo.toml", "[package]");
    let req = DispatchRequestBuilder::new("src/main.rs")
        .compile_args(&["--release"])
        .run_args(&["-v"])
        .build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![(
            "cargo".to_string(),
            strings(&[
                "run",
                "--quiet",
                "--manifest-path",
                "/work/Cargo.toml",
                "--release",
                "--",
                "-v"
            ]),
            false
        )]
    );
}

#[test]
fn cargo_main_rs_only_compile_checks() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/Cargo.toml", "[package]");
    let req = DispatchRequestBuilder::new("src/main.rs").only_compile().build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![(
            "cargo".to_string(),
            strings(&["check", "--quiet", "--manifest-path", "/work/Cargo.toml"]),
            true
        )]
    );
}

#[test]
fn other_rust_files_are_only_checked() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/Cargo.toml", "[package]");
    let req = DispatchRequestBuilder::new("src/lib.rs").run_args(&["a"]).build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(plan.steps.len(), 1);
    assert!(plan.steps[0].is_compile_step);
    assert_eq!(plan.steps[0].args()[0], "check");
    assert!(!plan.steps[0].args().contains(&"a".to_string()));
}

#[test]
fn unsupported_extension_is_an_error() {
    let fs = MockFileSystem::new();
    let req = DispatchRequestBuilder::new("notes.txt").build();

    match build_plan(&req, &ConfigFile::default(), &fs) {
        Err(ExecuterError::UnsupportedFileType(ext)) => assert_eq!(ext, "txt"),
        other => panic!("Expected UnsupportedFileType, got: {:?}", other),
    }
}

#[test]
fn run_script_marker_overrides_table() {
    let fs = MockFileSystem::new();
    fs.add_file("/work/.executer", "run.sh");
    fs.add_file("/work/run.sh", "#!/bin/sh\n");
    let req = DispatchRequestBuilder::new("notes.txt")
        .compile_args(&["-O2"])
        .run_args(&["a"])
        .build();

    let plan = build_plan(&req, &ConfigFile::default(), &fs).unwrap();

    assert_eq!(
        commands(&plan),
        vec![(
            "/work/run.sh".to_string(),
            strings(&["/work/notes.txt", "a"]),
            false
        )]
    );
}

#[test]
fn command_overrides_from_config() {
    let fs = MockFileSystem::new();
    let mut command = BTreeMap::new();
    command.insert("py".to_string(), "pypy3".to_string());
    command.insert("c".to_string(), "clang".to_string());
    let config = ConfigFile::try_from(RawConfigFile {
        config: ConfigSection {
            debug: false,
            exit_status_when_compile_error: 180,
        },
        command,
    })
    .unwrap();

    let plan = build_plan(&DispatchRequestBuilder::new("a.py").build(), &config, &fs).unwrap();
    assert_eq!(plan.steps[0].program, "pypy3");

    let mut req = DispatchRequestBuilder::new("a.c").build();
    req.compile_error_exit_code = config.config.exit_status_when_compile_error;
    let plan = build_plan(&req, &config, &fs).unwrap();
    assert_eq!(plan.steps[0].program, "clang");
    assert_eq!(plan.steps[0].failure_exit_code(), 180);
}
