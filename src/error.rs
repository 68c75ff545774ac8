// File: src/error.rs
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("could not read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON deck: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid binary deck: {0}")]
    Binary(#[from] bincode::Error),
    #[error("unsupported deck format for {0} (expected .json or .bin)")]
    UnsupportedFormat(PathBuf),
    #[error("duplicate entry id {0}")]
    DuplicateId(u32),
    #[error("could not persist deck: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown flag '{0}'")]
    UnknownFlag(String),
    #[error("flag {0} is not supported by this program")]
    UnsupportedFlag(String),
    #[error("flag {0} requires a value")]
    MissingValue(String),
    #[error("invalid value for {flag}: {message}")]
    InvalidValue { flag: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("no speech command configured")]
    NoCommand,
    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("could not open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("logger already installed: {0}")]
    AlreadySet(#[from] log::SetLoggerError),
}
