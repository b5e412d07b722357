// src/dispatch/table.rs

//! Static extension-to-toolchain table.

/// How a source file with a given extension is built and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toolchain {
    /// Run as `<command> <compile-args> <src> <args>`.
    ///
    /// `check_args`, when present, gives a syntax-check-only form
    /// (`<command> <check_args> <src>`) used for `--only-compile`.
    Interpreted {
        command: &'static str,
        check_args: Option<&'static [&'static str]>,
    },
    /// `cargo check` / `cargo run` depending on the project layout.
    Cargo,
    /// Compile with `<command> <build_args> -o <out> <compile-args> <src>`,
    /// then run `<out> <args>`.
    Compiled {
        command: &'static str,
        build_args: &'static [&'static str],
    },
}

/// Config key used to look up a command override for `cargo` projects.
pub const CARGO_COMMAND_KEY: &str = "cargo";

/// Look up the toolchain for a file extension (without the leading dot).
pub fn lookup(ext: &str) -> Option<Toolchain> {
    let toolchain = match ext {
        "py" => Toolchain::Interpreted {
            command: "python3",
            check_args: Some(&["-m", "py_compile"]),
        },
        "rs" => Toolchain::Cargo,
        "go" => Toolchain::Compiled {
            command: "go",
            build_args: &["build"],
        },
        "c" => Toolchain::Compiled {
            command: "gcc",
            build_args: &[],
        },
        "cpp" | "cc" | "cxx" => Toolchain::Compiled {
            command: "g++",
            build_args: &[],
        },
        "java" => Toolchain::Interpreted {
            command: "java",
            check_args: None,
        },
        "js" => Toolchain::Interpreted {
            command: "node",
            check_args: Some(&["--check"]),
        },
        "rb" => Toolchain::Interpreted {
            command: "ruby",
            check_args: Some(&["-c"]),
        },
        "sh" => Toolchain::Interpreted {
            command: "bash",
            check_args: Some(&["-n"]),
        },
        _ => return None,
    };
    Some(toolchain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(lookup("rs"), Some(Toolchain::Cargo));
        assert!(matches!(
            lookup("cxx"),
            Some(Toolchain::Compiled { command: "g++", .. })
        ));
        assert!(matches!(
            lookup("py"),
            Some(Toolchain::Interpreted { command: "python3", check_args: Some(_) })
        ));
    }

    #[test]
    fn unknown_or_missing_extension() {
        assert_eq!(lookup("txt"), None);
        assert_eq!(lookup(""), None);
        assert_eq!(lookup("PY"), None);
    }
}
