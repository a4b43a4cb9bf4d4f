//! Resolution of the analysis script against an ordered list of directories.

use std::path::{Path, PathBuf};

use super::AnalysisError;

/// Return the first `<base_dir>/<dir>/<script_name>` that exists.
///
/// The returned path is absolute so the interpreter does not resolve it
/// against its own working directory. When nothing matches, the error lists
/// every path that was checked, in order.
pub fn locate_script(
    base_dir: &Path,
    dirs: &[String],
    script_name: &str,
) -> Result<PathBuf, AnalysisError> {
    let checked: Vec<PathBuf> = dirs
        .iter()
        .map(|dir| base_dir.join(dir).join(script_name))
        .collect();

    match checked.iter().find(|p| p.is_file()) {
        Some(found) => Ok(std::path::absolute(found).unwrap_or_else(|_| found.clone())),
        None => Err(AnalysisError::ScriptNotFound { checked }),
    }
}
