// sftpbatch Session Gateway
//
// The interpreter only talks to this trait.
// RusshGateway (session.rs) is the real SSH/SFTP implementation,
// tests plug in a recording mock.
//
// close() takes the session by value, so a session cannot be closed twice.

use std::fmt;

use async_trait::async_trait;

use crate::config::ConnectConfig;
use crate::error::Result;
use crate::utils::{mtime_str, permission_str};

#[async_trait]
pub trait SessionGateway: Send {
    type Session: Send;

    /// Transport + authentication. Fails with `Error::Connection`.
    async fn connect(&mut self, config: &ConnectConfig) -> Result<Self::Session>;

    async fn close(&mut self, session: Self::Session) -> Result<()>;

    /// Fails with `Error::RemotePath` when the path does not exist
    async fn stat(&mut self, session: &mut Self::Session, remote: &str) -> Result<FileStat>;

    /// Remote → local, overwriting the local file. Returns bytes written.
    ///
    /// A failed transfer may leave a partial local file behind.
    async fn get(&mut self, session: &mut Self::Session, remote: &str, local: &str) -> Result<u64>;

    /// Local → remote. Returns bytes written.
    async fn put(&mut self, session: &mut Self::Session, local: &str, remote: &str) -> Result<u64>;

    /// Entry names of a remote directory, without "." and ".."
    async fn list_directory(&mut self, session: &mut Self::Session, path: &str) -> Result<Vec<String>>;
}

/// Remote file attributes (lstat)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileStat {
    pub size: u64,
    pub permissions: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub mtime: Option<u64>,
}

impl fmt::Display for FileStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
        write!(f, "{:10}  {:>5}  {:>5}  {:>10}  {}",
            self.permissions.map(permission_str).unwrap_or_else(|| "----------".to_string()),
            id(self.uid),
            id(self.gid),
            self.size,
            self.mtime.map(mtime_str).unwrap_or_else(|| "?".to_string()),
        )
    }
}
