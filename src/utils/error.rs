use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, JobError>;
