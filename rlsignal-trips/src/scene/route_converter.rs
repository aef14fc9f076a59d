use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use crate::trips::TripsError;

pub const DEFAULT_DUAROUTER_BINARY: &str = "duarouter";

/// converts a trips document into a full route file for a road network.
pub trait RouteConverter {
    fn convert(
        &self,
        network_file: &Path,
        trips_file: &Path,
        routes_file: &Path,
    ) -> Result<(), TripsError>;
}

/// runs SUMO's `duarouter` as a subprocess.
#[derive(Clone, Debug)]
pub struct Duarouter {
    pub binary: String,
}

impl Default for Duarouter {
    fn default() -> Self {
        Self {
            binary: String::from(DEFAULT_DUAROUTER_BINARY),
        }
    }
}

impl Duarouter {
    pub fn new(binary: &str) -> Duarouter {
        Duarouter {
            binary: binary.to_string(),
        }
    }

    pub fn arguments(
        &self,
        network_file: &Path,
        trips_file: &Path,
        routes_file: &Path,
    ) -> Vec<OsString> {
        vec![
            OsString::from("-n"),
            network_file.as_os_str().to_owned(),
            OsString::from("-t"),
            trips_file.as_os_str().to_owned(),
            OsString::from("-o"),
            routes_file.as_os_str().to_owned(),
        ]
    }
}

impl RouteConverter for Duarouter {
    fn convert(
        &self,
        network_file: &Path,
        trips_file: &Path,
        routes_file: &Path,
    ) -> Result<(), TripsError> {
        let args = self.arguments(network_file, trips_file, routes_file);
        log::debug!("running {} {:?}", self.binary, args);
        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TripsError::RouteConversion(format!("failure running '{}': {e}", self.binary))
            })?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(TripsError::RouteConversion(format!(
                "'{}' exited with {} while writing '{}': {}",
                self.binary,
                output.status,
                routes_file.display(),
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            log::warn!("{}: {}", self.binary, stderr.trim());
        }
        Ok(())
    }
}

/// leaves trips documents unconverted.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipConversion;

impl RouteConverter for SkipConversion {
    fn convert(
        &self,
        _network_file: &Path,
        trips_file: &Path,
        _routes_file: &Path,
    ) -> Result<(), TripsError> {
        log::debug!("skipping route conversion of {}", trips_file.display());
        Ok(())
    }
}
