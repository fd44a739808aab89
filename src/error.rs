use std::fmt;

/// Unified error type for the conversion pipeline.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The body font could not be read, parsed, or embedded.
    Font(String),
    /// Layout or PDF assembly failed.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Font(msg) => write!(f, "font error: {msg}"),
            Error::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
