// sftpbatch Session (russh based)
//
// russh handles the SSH connection and password authentication,
// russh-sftp runs the SFTP subsystem on top of it.
// RusshGateway is the SessionGateway used by the CLI.

use std::sync::Arc;

use async_trait::async_trait;
use russh::client;
use russh::Disconnect;
use russh_sftp::client::SftpSession as RusshSftpSession;

use crate::config::{AuthMethod, ConnectConfig};
use crate::error::{Error, Result};
use crate::gateway::{FileStat, SessionGateway};
use crate::sftp::SftpClient;

// russh client handler (server events)
struct ClientHandler;

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::key::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        // host keys are not pinned, any key is accepted
        tracing::debug!("[session] server key {}", server_public_key.fingerprint());
        Ok(true)
    }
}

/// One authenticated SFTP connection
pub struct RemoteSession {
    server: String,
    ssh: client::Handle<ClientHandler>,
    sftp: SftpClient,
}

impl RemoteSession {
    pub fn server(&self) -> &str {
        &self.server
    }
}

#[derive(Default)]
pub struct RusshGateway {
    config: Arc<client::Config>,
}

impl RusshGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

fn connection_error(config: &ConnectConfig, e: impl std::fmt::Display) -> Error {
    Error::Connection(format!("{}: {}", config.addr(), e))
}

#[async_trait]
impl SessionGateway for RusshGateway {
    type Session = RemoteSession;

    async fn connect(&mut self, config: &ConnectConfig) -> Result<RemoteSession> {
        let addr = config.addr();
        tracing::info!("Open sftp connection to {}", config.host);
        tracing::debug!("[session] connecting to {}", addr);

        let mut ssh = client::connect(self.config.clone(), addr.as_str(), ClientHandler)
            .await
            .map_err(|e| connection_error(config, e))?;

        let authed = match &config.auth {
            AuthMethod::Password(pw) => ssh.authenticate_password(&config.username, pw)
                .await
                .map_err(|e| connection_error(config, e))?,
        };
        if !authed {
            return Err(connection_error(config,
                format!("authentication failed for user {}", config.username)));
        }
        tracing::debug!("[session] authenticated as {}", config.username);

        let channel = ssh.channel_open_session()
            .await
            .map_err(|e| connection_error(config, e))?;

        channel.request_subsystem(true, "sftp")
            .await
            .map_err(|e| connection_error(config, e))?;

        let sftp = RusshSftpSession::new(channel.into_stream())
            .await
            .map_err(|e| connection_error(config, e))?;

        tracing::debug!("[session] SFTP ready");
        Ok(RemoteSession {
            server: config.host.clone(),
            ssh,
            sftp: SftpClient::new(sftp),
        })
    }

    async fn close(&mut self, session: RemoteSession) -> Result<()> {
        tracing::info!("Closing the connection to {}", session.server);
        session.sftp.close().await?;
        session.ssh.disconnect(Disconnect::ByApplication, "", "English")
            .await
            .map_err(|e| Error::Connection(format!("{}: {}", session.server, e)))?;
        Ok(())
    }

    async fn stat(&mut self, session: &mut RemoteSession, remote: &str) -> Result<FileStat> {
        session.sftp.stat(remote).await
    }

    async fn get(&mut self, session: &mut RemoteSession, remote: &str, local: &str) -> Result<u64> {
        session.sftp.get(remote, local).await
    }

    async fn put(&mut self, session: &mut RemoteSession, local: &str, remote: &str) -> Result<u64> {
        session.sftp.put(local, remote).await
    }

    async fn list_directory(&mut self, session: &mut RemoteSession, path: &str) -> Result<Vec<String>> {
        session.sftp.ls(path).await
    }
}
