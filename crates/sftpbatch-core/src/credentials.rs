// sftpbatch Credential Store
//
// Secrets file format, one record per line:
//   <server>;<username>;<password>;
//
// A line matches when the server string appears anywhere in it.
// The file is re-read on every lookup and the last matching line wins.

use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub server: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: Option<PathBuf>,
}

impl CredentialStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn lookup(&self, server: &str) -> Result<Credential> {
        tracing::info!("Searching for the credentials for server {}", server);

        let path = self.path.as_ref().ok_or(Error::CredentialsFileMissing)?;
        if !path.exists() {
            return Err(Error::CredentialsFileNotFound { path: path.clone() });
        }
        let content = std::fs::read_to_string(path)?;

        let mut fields: Vec<&str> = Vec::new();
        for line in content.lines().filter(|l| l.contains(server)) {
            let record = line.trim_end_matches('\r');
            let record = record.strip_suffix(';').unwrap_or(record);
            fields = record.split(';').collect();
            tracing::info!("Credentials found");
        }

        match fields.as_slice() {
            [stored, username, password] => Ok(Credential {
                server: stored.to_string(),
                username: username.to_string(),
                password: password.to_string(),
            }),
            _ => Err(Error::CredentialsInvalid {
                server: server.to_string(),
                found: fields.len(),
            }),
        }
    }
}
