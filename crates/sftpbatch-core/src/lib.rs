// sftpbatch Core Library (russh based)
//
// control file → Program → Interpreter → SessionGateway (russh / russh-sftp)

pub mod config;
pub mod credentials;
pub mod directive;
pub mod error;
pub mod gateway;
pub mod interpreter;
pub mod logging;
pub mod session;
pub mod sftp;
pub mod state;
pub mod utils;

pub use config::{ConnectConfig, RunnerConfig};
pub use credentials::{Credential, CredentialStore};
pub use directive::{ControlLine, Directive, Program};
pub use error::{DirectiveError, Error, Result};
pub use gateway::{FileStat, SessionGateway};
pub use interpreter::{Interpreter, RunReport};
pub use session::RusshGateway;
pub use state::SessionState;

pub const PROGRAM_NAME: &str = "Secure File Transfer";
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");
