// sftpbatch Error Types
//
// One enum for every failure a control-file run can hit.
// DirectiveError wraps it with the control-file line that was executing.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("[ERROR] You must specify a control file. Found {found} parameter(s)")]
    ArgumentCount { found: usize },

    #[error("Environment variable sftmCredentialFile not found")]
    CredentialsFileMissing,

    #[error("Credentials file not found: {}", path.display())]
    CredentialsFileNotFound { path: PathBuf },

    #[error("No Username/Password or multiple entries found for server {server} (found {found} entries)")]
    CredentialsInvalid { server: String, found: usize },

    #[error("Control file not found: {}", path.display())]
    ControlFileNotFound { path: PathBuf },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("No active session for {command}")]
    NoActiveSession { command: String },

    #[error("Remote path error: {path}: {reason}")]
    RemotePath { path: String, reason: String },

    #[error("Transfer error: {0}")]
    Transfer(String),

    #[error("Malformed directive {keyword}: expected {expected} fields, found {found}")]
    MalformedDirective {
        keyword: String,
        expected: usize,
        found: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Errors that are printed and end the run without a failure status
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Error::ArgumentCount { .. }
                | Error::CredentialsFileMissing
                | Error::CredentialsFileNotFound { .. }
                | Error::ControlFileNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A failure raised while executing one control-file line.
///
/// `completed` counts the directives that finished before the abort.
#[derive(Debug)]
pub struct DirectiveError {
    pub line: usize,
    pub command: String,
    pub completed: usize,
    pub error: Error,
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} ({}): {}", self.line, self.command, self.error)
    }
}

impl std::error::Error for DirectiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
