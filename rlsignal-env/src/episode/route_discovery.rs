use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::EnvError;

const EMERGENCY_DIRECTORY_PREFIX: &str = "emergency_";

/// finds the route files generated for one environment type under a
/// `<root>/<scene>/<env_type>/emergency_<p>/<route_filename>` tree.
///
/// # Arguments
///
/// * `root` - root directory of the generated routes
/// * `env_type` - environment type directory, e.g. "train" or "test"
/// * `route_filename` - name of the route file in each emergency directory
///
/// # Returns
///
/// the existing route files in sorted order.
pub fn discover_route_files(
    root: &Path,
    env_type: &str,
    route_filename: &str,
) -> Result<Vec<PathBuf>, EnvError> {
    let mut found = Vec::new();
    for scene_dir in read_subdirectories(root)? {
        let env_dir = scene_dir.join(env_type);
        if !env_dir.is_dir() {
            continue;
        }
        for emergency_dir in read_subdirectories(&env_dir)? {
            let is_emergency_dir = emergency_dir
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(EMERGENCY_DIRECTORY_PREFIX))
                .unwrap_or(false);
            let route_file = emergency_dir.join(route_filename);
            if is_emergency_dir && route_file.is_file() {
                found.push(route_file);
            }
        }
    }
    log::debug!(
        "found {} '{env_type}' route files under {}",
        found.len(),
        root.display()
    );
    Ok(found.into_iter().sorted().collect_vec())
}

fn read_subdirectories(directory: &Path) -> Result<Vec<PathBuf>, EnvError> {
    let read_error = |e: std::io::Error| EnvError::ReadError {
        path: directory.to_owned(),
        message: e.to_string(),
    };
    let entries = directory
        .read_dir()
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    Ok(entries
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect_vec())
}
