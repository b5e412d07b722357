use std::io::Write;
use std::path::Path;

use executer::config::{load_and_validate, load_for_source, resolve_config_path, DEFAULT_CONFIG_FILE_NAME};
use executer::errors::ExecuterError;
use executer::fs::RealFileSystem;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn full_config_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[config]
debug = true
exit_status_when_compile_error = 180

[command]
py = "pypy3"
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert!(cfg.config.debug);
    assert_eq!(cfg.config.exit_status_when_compile_error, 180);
    assert_eq!(cfg.command_for("py", "python3"), "pypy3");
    assert_eq!(cfg.command_for("c", "gcc"), "gcc");
}

#[test]
fn empty_file_uses_defaults() {
    let file = NamedTempFile::new().unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert!(!cfg.config.debug);
    assert_eq!(cfg.config.exit_status_when_compile_error, 100);
}

#[test]
fn out_of_range_exit_status_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[config]\nexit_status_when_compile_error = 0\n").unwrap();

    match load_and_validate(file.path()) {
        Err(ExecuterError::ConfigError(msg)) => {
            assert!(msg.contains("exit_status_when_compile_error"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_command_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[command]\ngo = \"  \"\n").unwrap();

    match load_and_validate(file.path()) {
        Err(ExecuterError::ConfigError(msg)) => assert!(msg.contains("[command].go")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_keys_are_toml_errors() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[config]\nverbose = true\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ExecuterError::TomlError(_))
    ));
}

#[test]
fn config_path_precedence() {
    let dir = tempdir().unwrap();
    let fs = RealFileSystem;

    assert_eq!(resolve_config_path(&fs, None, None, dir.path()), None);

    let default_path = dir.path().join(DEFAULT_CONFIG_FILE_NAME);
    std::fs::write(&default_path, "").unwrap();
    assert_eq!(
        resolve_config_path(&fs, None, None, dir.path()),
        Some(default_path.clone())
    );
    assert_eq!(
        resolve_config_path(&fs, None, Some("/env/cfg.toml"), dir.path()),
        Some(Path::new("/env/cfg.toml").to_path_buf())
    );
    assert_eq!(
        resolve_config_path(
            &fs,
            Some(Path::new("/cli/cfg.toml")),
            Some("/env/cfg.toml"),
            dir.path()
        ),
        Some(Path::new("/cli/cfg.toml").to_path_buf())
    );
}

#[test]
fn missing_explicit_config_is_an_io_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_for_source(&RealFileSystem, Some(&missing), None, dir.path());
    assert!(matches!(result, Err(ExecuterError::IoError(_))));
}

#[test]
fn no_config_anywhere_gives_defaults() {
    let dir = tempdir().unwrap();

    let cfg = load_for_source(&RealFileSystem, None, None, dir.path()).unwrap();
    assert_eq!(cfg.config.exit_status_when_compile_error, 100);
}
