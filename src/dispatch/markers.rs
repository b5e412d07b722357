// src/dispatch/markers.rs

//! Lightweight project-layout probes.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::Result;
use crate::fs::FileSystem;

/// Marker file whose first line names a custom run script.
pub const RUN_SCRIPT_MARKER: &str = ".executer";

pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// Find the nearest `Cargo.toml` in `start_dir` or any of its ancestors.
pub fn find_cargo_manifest(fs: &dyn FileSystem, start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CARGO_MANIFEST))
        .find(|candidate| fs.is_file(candidate))
}

/// Custom run script declared by a `.executer` marker in `dir`.
///
/// Returns `None` when there is no marker, the marker is empty, or the
/// script it names does not exist.
pub fn custom_run_script(fs: &dyn FileSystem, dir: &Path) -> Result<Option<PathBuf>> {
    let marker = dir.join(RUN_SCRIPT_MARKER);
    if !fs.is_file(&marker) {
        return Ok(None);
    }

    let Some(line) = fs.read_first_line(&marker)? else {
        debug!(marker = %marker.display(), "run script marker is empty");
        return Ok(None);
    };

    let script = dir.join(line);
    if fs.is_file(&script) {
        Ok(Some(script))
    } else {
        warn!(
            marker = %marker.display(),
            script = %script.display(),
            "run script named by marker does not exist; ignoring marker"
        );
        Ok(None)
    }
}
