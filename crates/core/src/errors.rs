use thiserror::Error;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the settlement engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Money operation failed: {0}")]
    Money(#[from] MoneyError),

    #[error("Data source operation failed: {0}")]
    Repository(String),

    #[error("Input validation failed: {0}")]
    Validation(String),

    #[error("Report generation failed: {0}")]
    Report(String),
}

/// Errors raised by the money primitives.
///
/// Division by exactly zero is the only failure the money type can
/// produce; every other operation is total.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    #[error("cannot divide a monetary amount by zero")]
    DivisionByZero,
}

impl Error {
    pub fn repository(message: impl Into<String>) -> Self {
        Error::Repository(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Report(err.to_string())
    }
}
