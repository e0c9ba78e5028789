use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or driving the terminal card.
///
/// Nothing inside the card itself can fail: repeated triggers are ignored and
/// missing overlay targets are skipped. These variants only cover the outer
/// shell (terminal I/O, logging and the optional content file).
#[derive(Debug, Error)]
pub enum CardError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("unsupported log level `{0}`")]
    InvalidLogLevel(String),

    #[error("failed to read card content from `{}`: {source}", path.display())]
    Content {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CardError>;
