use std::num::ParseIntError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipectlError {
    #[error("Invalid or missing repository '{0}'. eg octocat/hello-world")]
    InvalidRepository(String),

    #[error("Missing pipeline number")]
    MissingPipelineNumber,

    #[error("Invalid pipeline number '{value}'")]
    InvalidPipelineNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Pipeline number must be greater than zero")]
    ZeroPipelineNumber,

    #[error("You must provide the server address")]
    MissingServer,

    #[error("You must provide your access token")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl PipectlError {
    /// Whether the error was raised while reading command arguments,
    /// before any network interaction.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRepository(_)
                | Self::MissingPipelineNumber
                | Self::InvalidPipelineNumber { .. }
                | Self::ZeroPipelineNumber
        )
    }
}

pub type Result<T> = std::result::Result<T, PipectlError>;
