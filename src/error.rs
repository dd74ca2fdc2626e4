//! Error type shared by the parser, evaluator and built-in applications.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Everything that can abort the evaluation of a command line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed command line or atomic command.
    #[error("{0}")]
    Parse(String),

    /// The invocation name is not registered.
    #[error("{0}: unknown application")]
    UnknownApp(String),

    /// A bare word is not a valid wildcard pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Input or output redirection target is unusable.
    #[error("{0}")]
    Redirect(String),

    /// Failure reported by a built-in application.
    #[error("{app}: {message}")]
    App { app: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShellError {
    pub fn parse(message: impl Into<String>) -> Self {
        ShellError::Parse(message.into())
    }

    /// Build an application error; displayed as `app: message`.
    pub fn app(app: &str, message: impl Into<String>) -> Self {
        ShellError::App {
            app: app.to_string(),
            message: message.into(),
        }
    }
}
