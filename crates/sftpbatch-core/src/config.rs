// sftpbatch Configuration
//
// RunnerConfig : paths taken from the environment once, then passed down
// ConnectConfig: one OPEN directive resolved against the credential store

use std::path::PathBuf;

use crate::credentials::Credential;
use crate::error::{Error, Result};

/// Environment variable holding the path of the credentials file
pub const CREDENTIAL_FILE_ENV: &str = "sftmCredentialFile";
/// Environment variable holding the path of the transport diagnostics log
pub const LOG_FILE_ENV: &str = "sftmLogFile";

#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub credentials_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl RunnerConfig {
    pub fn from_env() -> Self {
        Self {
            credentials_file: std::env::var_os(CREDENTIAL_FILE_ENV).map(PathBuf::from),
            log_file:         std::env::var_os(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConnectConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: AuthMethod,
}

#[derive(Debug, Clone)]
pub enum AuthMethod {
    Password(String),
}

impl ConnectConfig {
    /// Builds a password-authenticated config from an OPEN directive's fields
    pub fn from_credential(host: &str, port: &str, credential: Credential) -> Result<Self> {
        let port = port.trim().parse::<u16>()
            .map_err(|_| Error::Connection(format!("invalid port '{}' for {}", port, host)))?;
        Ok(Self {
            host: host.to_string(),
            port,
            username: credential.username,
            auth: AuthMethod::Password(credential.password),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
