use std::path::Path;

use crate::trips::TripsError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), TripsError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| TripsError::WriteError {
            path: dirspath.to_owned(),
            message: format!("error building output directory: {e}"),
        })
    } else {
        Ok(())
    }
}
