// sftpbatch CLI Runner
//
// argument check → read control file → parse → Interpreter over RusshGateway

use std::fmt;
use std::path::Path;

use sftpbatch_core::{
    CredentialStore, DirectiveError, Error, Interpreter, Program, RunReport, RunnerConfig,
    RusshGateway,
};

pub enum Failure {
    Setup(Error),
    Directive(DirectiveError),
}

impl Failure {
    /// Failures that are printed but still end the process with status 0
    pub fn exits_cleanly(&self) -> bool {
        match self {
            Failure::Setup(e)     => e.is_setup_error(),
            Failure::Directive(d) => d.error.is_setup_error(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Setup(e)     => write!(f, "{}", e),
            Failure::Directive(d) => write!(f, "{}", d),
        }
    }
}

impl From<Error> for Failure {
    fn from(e: Error) -> Self {
        Failure::Setup(e)
    }
}

impl From<DirectiveError> for Failure {
    fn from(e: DirectiveError) -> Self {
        Failure::Directive(e)
    }
}

/// Exactly one parameter: the control file
pub fn validate_arguments(args: &[String]) -> Result<&str, Error> {
    match args {
        [_, control_file] => Ok(control_file.as_str()),
        _ => {
            tracing::error!("Found Parameters {:?}", args);
            Err(Error::ArgumentCount { found: args.len().saturating_sub(1) })
        }
    }
}

pub async fn read_control_file(path: &Path) -> Result<Program, Error> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ControlFileNotFound { path: path.to_path_buf() },
            _ => Error::Io(e),
        })?;

    let program = Program::parse(&text);
    tracing::info!("Control file contains {} lines", program.len());
    Ok(program)
}

pub async fn run(args: &[String], config: &RunnerConfig) -> Result<RunReport, Failure> {
    let control_file = validate_arguments(args)?;
    let program      = read_control_file(Path::new(control_file)).await?;

    let credentials  = CredentialStore::new(config.credentials_file.clone());
    let mut interp   = Interpreter::new(RusshGateway::new(), credentials);

    let report = interp.run(&program).await.map_err(|e| {
        tracing::error!("Aborted after {} completed directive(s)", e.completed);
        e
    })?;

    if interp.state().is_open() {
        tracing::info!("Control file ended without CLOSE, connection left open");
    }
    tracing::info!("Control file finished: {} directive(s) executed, {} line(s) skipped",
        report.executed, report.skipped);
    Ok(report)
}
