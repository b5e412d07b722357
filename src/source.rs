// src/source.rs

//! Path metadata derived from the source file argument.

use std::path::{Path, PathBuf};

/// Decomposed view of the source file path.
///
/// For `build/main.py` run from `/home/user`:
///
/// | field              | value                       |
/// |--------------------|-----------------------------|
/// | `original`         | `build/main.py`             |
/// | `path`             | `/home/user/build/main.py`  |
/// | `path_without_ext` | `/home/user/build/main`     |
/// | `ext`              | `py`                        |
/// | `base`             | `main.py`                   |
/// | `dir`              | `/home/user/build`          |
/// | `name`             | `main`                      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub original: String,
    pub path: PathBuf,
    pub path_without_ext: PathBuf,
    pub ext: String,
    pub base: String,
    pub dir: PathBuf,
    pub name: String,
}

impl Source {
    /// Build source metadata, resolving relative paths against the current
    /// working directory.
    pub fn new(original: impl Into<String>) -> Self {
        let original = original.into();
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self::with_base_dir(original, &cwd)
    }

    /// Same as [`Source::new`] with an explicit directory for relative paths.
    pub fn with_base_dir(original: impl Into<String>, base_dir: &Path) -> Self {
        let original = original.into();
        let path = absolutize(Path::new(&original), base_dir);

        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        let (name, ext) = match base.rfind('.') {
            Some(idx) => (base[..idx].to_string(), base[idx + 1..].to_string()),
            None => (base.clone(), String::new()),
        };

        let path_without_ext = if ext.is_empty() {
            path.clone()
        } else {
            dir.join(&name)
        };

        Self {
            original,
            path,
            path_without_ext,
            ext,
            base,
            dir,
            name,
        }
    }

    /// Absolute path as a `String`, the form toolchains receive on argv.
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn path_without_ext_str(&self) -> String {
        self.path_without_ext.to_string_lossy().into_owned()
    }
}

/// Lexically absolutize `p` against `base_dir`, dropping `.` components and
/// resolving `..` without touching the filesystem.
fn absolutize(p: &Path, base_dir: &Path) -> PathBuf {
    use std::path::Component;

    let joined = if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    };

    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
