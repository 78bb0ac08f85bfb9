//! Error handling module for the fibgc CLI.

use thiserror::Error;

/// Top-level error type for the interactive shell.
#[derive(Error, Debug)]
pub enum CliError {
    /// Propagated from a core heap operation.
    #[error(transparent)]
    Heap(#[from] fibgc_core::HeapError),

    /// The prompt could not be read (EOF or a broken terminal).
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fibgc_core::HeapError;

    #[test]
    fn heap_error_display_passes_through() {
        let err: CliError = HeapError::InvalidSize.into();
        assert_eq!(err.to_string(), HeapError::InvalidSize.to_string());
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
