// Recording SessionGateway for interpreter tests

use std::io::Write;

use async_trait::async_trait;
use sftpbatch_core::config::AuthMethod;
use sftpbatch_core::{ConnectConfig, CredentialStore, Error, FileStat, Result, SessionGateway};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect { host: String, port: u16, username: String, password: String },
    Close(u32),
    Stat(u32, String),
    Get(u32, String, String),
    Put(u32, String, String),
    List(u32, String),
}

pub fn connect(host: &str, port: u16, username: &str, password: &str) -> Call {
    Call::Connect {
        host: host.to_string(),
        port,
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct MockGateway {
    pub calls: Vec<Call>,
    pub next_session: u32,
    /// connect fails for this host
    pub refuse_host: Option<String>,
    /// stat fails for these remote paths
    pub missing: Vec<String>,
    /// get / put fail for this path
    pub broken_transfer: Option<String>,
    pub listing: Vec<String>,
}

#[async_trait]
impl SessionGateway for MockGateway {
    type Session = u32;

    async fn connect(&mut self, config: &ConnectConfig) -> Result<u32> {
        let AuthMethod::Password(password) = &config.auth;
        self.calls.push(connect(&config.host, config.port, &config.username, password));
        if self.refuse_host.as_deref() == Some(config.host.as_str()) {
            return Err(Error::Connection(format!("{}: connection refused", config.addr())));
        }
        self.next_session += 1;
        Ok(self.next_session)
    }

    async fn close(&mut self, session: u32) -> Result<()> {
        self.calls.push(Call::Close(session));
        Ok(())
    }

    async fn stat(&mut self, session: &mut u32, remote: &str) -> Result<FileStat> {
        self.calls.push(Call::Stat(*session, remote.to_string()));
        if self.missing.iter().any(|m| m == remote) {
            return Err(Error::RemotePath { path: remote.to_string(), reason: "No such file".into() });
        }
        Ok(FileStat { size: 3, permissions: Some(0o100644), ..Default::default() })
    }

    async fn get(&mut self, session: &mut u32, remote: &str, local: &str) -> Result<u64> {
        self.calls.push(Call::Get(*session, remote.to_string(), local.to_string()));
        if self.broken_transfer.as_deref() == Some(remote) {
            return Err(Error::Transfer(format!("{} → {}: channel closed", remote, local)));
        }
        Ok(3)
    }

    async fn put(&mut self, session: &mut u32, local: &str, remote: &str) -> Result<u64> {
        self.calls.push(Call::Put(*session, local.to_string(), remote.to_string()));
        if self.broken_transfer.as_deref() == Some(local) {
            return Err(Error::Transfer(format!("{} → {}: channel closed", local, remote)));
        }
        Ok(3)
    }

    async fn list_directory(&mut self, session: &mut u32, path: &str) -> Result<Vec<String>> {
        self.calls.push(Call::List(*session, path.to_string()));
        Ok(self.listing.clone())
    }
}

/// Credential store backed by a temp file; keep the file alive for the test
pub fn credentials(content: &str) -> (tempfile::NamedTempFile, CredentialStore) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let store = CredentialStore::new(Some(file.path().to_path_buf()));
    (file, store)
}
