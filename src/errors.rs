use std::fmt::{Debug, Display};

/// Wrapper around errors that can potentially be produced by calliope
#[non_exhaustive]
pub enum Error {
    /// Error opening or reading a file
    FileIoError(std::io::Error),
    /// Input is not a WebVTT file. Carries a diagnostic message.
    FileFormatError(String),
}

impl std::error::Error for Error {}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")?;
        if let Some(source) = std::error::Error::source(&self) {
            writeln!(f, "Caused by:\n\t{source}")?;
        }
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::FileIoError(err) => write!(
                f,
                "file i/o error occurred while trying to read or write from a file: {err:?}"
            ),
            Error::FileFormatError(message) => {
                write!(f, "invalid WebVTT file: {message}")
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::FileIoError(value)
    }
}
