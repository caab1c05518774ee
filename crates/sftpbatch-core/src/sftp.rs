// sftpbatch SFTP (russh-sftp based)
//
// SftpClient: stat, ls, get, put, close over one SFTP subsystem channel.
// Transfers stream in 64KB chunks and always overwrite the target.

use russh_sftp::client::SftpSession;
use russh_sftp::protocol::OpenFlags;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::gateway::FileStat;

const CHUNK_SIZE: usize = 64 * 1024; // 64KB

fn transfer_error(from: &str, to: &str, e: impl std::fmt::Display) -> Error {
    Error::Transfer(format!("{} → {}: {}", from, to, e))
}

pub struct SftpClient {
    sftp: SftpSession,
}

impl SftpClient {
    pub fn new(sftp: SftpSession) -> Self {
        Self { sftp }
    }

    /// lstat: attributes of the link itself, not its target
    pub async fn stat(&mut self, remote: &str) -> Result<FileStat> {
        let attrs = self.sftp.symlink_metadata(remote)
            .await
            .map_err(|e| Error::RemotePath { path: remote.to_string(), reason: e.to_string() })?;

        Ok(FileStat {
            size: attrs.size.unwrap_or(0),
            permissions: attrs.permissions,
            uid: attrs.uid,
            gid: attrs.gid,
            mtime: attrs.mtime.map(|t| t as u64),
        })
    }

    pub async fn ls(&mut self, path: &str) -> Result<Vec<String>> {
        let dir = self.sftp.read_dir(path)
            .await
            .map_err(|e| Error::RemotePath { path: path.to_string(), reason: e.to_string() })?;

        Ok(dir.into_iter()
            .map(|e| e.file_name())
            .filter(|name| name != "." && name != "..")
            .collect())
    }

    pub async fn get(&mut self, remote: &str, local: &str) -> Result<u64> {
        let mut remote_file = self.sftp.open(remote)
            .await
            .map_err(|e| Error::RemotePath { path: remote.to_string(), reason: e.to_string() })?;

        let mut local_file = tokio::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(local)
            .await
            .map_err(|e| transfer_error(remote, local, e))?;

        let mut buf         = vec![0u8; CHUNK_SIZE];
        let mut transferred = 0u64;

        loop {
            let n = remote_file.read(&mut buf)
                .await
                .map_err(|e| transfer_error(remote, local, e))?;
            if n == 0 { break; }

            local_file.write_all(&buf[..n])
                .await
                .map_err(|e| transfer_error(remote, local, e))?;
            transferred += n as u64;
        }

        local_file.flush().await.map_err(|e| transfer_error(remote, local, e))?;
        Ok(transferred)
    }

    pub async fn put(&mut self, local: &str, remote: &str) -> Result<u64> {
        let mut local_file = tokio::fs::File::open(local)
            .await
            .map_err(|e| transfer_error(local, remote, e))?;

        let mut remote_file = self.sftp
            .open_with_flags(remote, OpenFlags::CREATE | OpenFlags::WRITE | OpenFlags::TRUNCATE)
            .await
            .map_err(|e| transfer_error(local, remote, e))?;

        let mut buf         = vec![0u8; CHUNK_SIZE];
        let mut transferred = 0u64;

        loop {
            let n = local_file.read(&mut buf)
                .await
                .map_err(|e| transfer_error(local, remote, e))?;
            if n == 0 { break; }

            remote_file.write_all(&buf[..n])
                .await
                .map_err(|e| transfer_error(local, remote, e))?;
            transferred += n as u64;
        }

        remote_file.shutdown().await.map_err(|e| transfer_error(local, remote, e))?;
        Ok(transferred)
    }

    pub async fn close(&self) -> Result<()> {
        self.sftp.close()
            .await
            .map_err(|e| Error::Connection(e.to_string()))
    }
}
