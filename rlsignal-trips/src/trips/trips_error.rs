use std::path::PathBuf;

use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
pub enum TripsError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("invalid probability distribution '{name}': {message}")]
    InvalidDistribution { name: String, message: String },
    #[error("failure sampling trip attributes: {0}")]
    Sampling(String),
    #[error("failure writing route document: {0}")]
    XmlWrite(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error("route conversion failed: {0}")]
    RouteConversion(String),
    #[error("errors encountered during batch scene processing: {0}")]
    BatchProcessing(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

pub fn batch_processing_error(errors: &[TripsError]) -> TripsError {
    let concatenated = errors.iter().map(|e| e.to_string()).join("\n  ");
    TripsError::BatchProcessing(format!("[\n  {concatenated}\n]"))
}
