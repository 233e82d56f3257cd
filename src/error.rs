use thiserror::Error;

#[derive(Error, Debug)]
pub enum JtagError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Link fault: {0}")]
    LinkFault(String),

    #[error("Console error: {0}")]
    Console(String),
}

impl JtagError {
    /// Process exit code for this failure class. Transport faults get a
    /// code of their own so scripts can tell them from startup failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            JtagError::Configuration(_) => 2,
            JtagError::Connection(_) => 3,
            JtagError::LinkFault(_) => 4,
            JtagError::Console(_) => 5,
        }
    }
}

pub type JtagResult<T> = std::result::Result<T, JtagError>;
