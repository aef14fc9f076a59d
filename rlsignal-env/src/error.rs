use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum EnvError {
    #[error("invalid environment configuration: {0}")]
    InvalidConfig(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("environment failure: {0}")]
    Environment(String),
    #[error("agent '{0}' is trained by the external RL toolkit and cannot run as a baseline")]
    UnsupportedAgent(String),
}
