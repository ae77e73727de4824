use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{title} is not a valid {game} title. Is your mode correct?")]
    UnsupportedTitle { game: &'static str, title: String },

    #[error("Game version {0} is not supported.")]
    UnsupportedVersion(String),

    #[error("Unknown game '{0}' (expected one of: swsh, bdsp, la, sv)")]
    UnknownGame(String),

    #[error("Remote protocol error for '{command}': {message}")]
    Protocol { command: String, message: String },

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Invalid acceptance pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("No accepted trainer id within {0} restarts")]
    RestartLimitReached(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check whether this error came from the remote link rather than
    /// from local configuration or lookup failures.
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Protocol { .. } | Error::ShortRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_remote() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(Error::Io(io_err).is_remote());

        assert!(!Error::UnsupportedVersion("9.9.9".to_string()).is_remote());
        assert!(
            !Error::UnsupportedTitle {
                game: "SWSH",
                title: "0".to_string()
            }
            .is_remote()
        );
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = Error::UnsupportedVersion("9.9.9".to_string());
        assert_eq!(err.to_string(), "Game version 9.9.9 is not supported.");
    }
}
