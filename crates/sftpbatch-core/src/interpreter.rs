// sftpbatch Session Interpreter
//
// Walks a parsed Program strictly in order, one directive at a time.
// Any failure aborts the rest of the program. Blank and unknown lines are skipped.
//
// Sessions are never closed implicitly: not on error, not at the end of the
// program, and not when OPEN replaces a live session. A replaced session is
// parked in `orphaned` and only released when the interpreter is dropped.

use crate::config::ConnectConfig;
use crate::credentials::CredentialStore;
use crate::directive::{Directive, Program};
use crate::error::{DirectiveError, Error, Result};
use crate::gateway::SessionGateway;
use crate::state::SessionState;
use crate::utils::fmt_size;

/// What a fully executed program produced
#[derive(Debug, Default)]
pub struct RunReport {
    /// Directives that did work (skipped lines are not counted)
    pub executed: usize,
    pub skipped: usize,
    /// (path, entry names) for every DIR, in program order
    pub listings: Vec<(String, Vec<String>)>,
}

pub struct Interpreter<G: SessionGateway> {
    gateway: G,
    credentials: CredentialStore,
    state: SessionState<G::Session>,
    orphaned: Vec<G::Session>,
}

impl<G: SessionGateway> Interpreter<G> {
    pub fn new(gateway: G, credentials: CredentialStore) -> Self {
        Self {
            gateway,
            credentials,
            state: SessionState::NoSession,
            orphaned: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState<G::Session> {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Sessions replaced by a second OPEN without a CLOSE
    pub fn orphaned(&self) -> usize {
        self.orphaned.len()
    }

    pub async fn run(&mut self, program: &Program) -> std::result::Result<RunReport, DirectiveError> {
        tracing::info!("Starting executing control file");
        let mut report = RunReport::default();

        for line in &program.lines {
            match &line.directive {
                Directive::Blank => {
                    tracing::info!("Ignoring blank line {} in control file", line.number);
                    report.skipped += 1;
                }
                Directive::Unknown(keyword) => {
                    tracing::info!("Ignoring unknown command '{}' on line {}", keyword, line.number);
                    report.skipped += 1;
                }
                directive => {
                    self.execute(directive, &mut report)
                        .await
                        .map_err(|error| DirectiveError {
                            line: line.number,
                            command: directive.keyword().to_string(),
                            completed: report.executed,
                            error,
                        })?;
                    report.executed += 1;
                }
            }
        }

        if self.state.is_open() {
            tracing::debug!("control file ended with a session still open");
        }
        Ok(report)
    }

    async fn execute(&mut self, directive: &Directive, report: &mut RunReport) -> Result<()> {
        match directive {
            Directive::Open { server, port } => {
                let credential = self.credentials.lookup(server)?;
                let config     = ConnectConfig::from_credential(server, port, credential)?;
                let session    = self.gateway.connect(&config).await?;

                if let Some(prev) = self.state.open(session) {
                    tracing::warn!("OPEN {} while a session is open, previous session left unclosed", server);
                    self.orphaned.push(prev);
                }
            }
            Directive::Close => {
                let session = self.state.take().ok_or_else(|| no_session(directive))?;
                self.gateway.close(session).await?;
            }
            Directive::Download { source, target } => {
                let session = self.state.session_mut().ok_or_else(|| no_session(directive))?;
                tracing::info!("Start downloading {} to {}", source, target);
                let stat = self.gateway.stat(session, source).await?;
                tracing::info!("Stats of remote file: {}", stat);
                let n = self.gateway.get(session, source, target).await?;
                tracing::info!("File transferred ({})", fmt_size(n));
            }
            Directive::Upload { source, target } => {
                let session = self.state.session_mut().ok_or_else(|| no_session(directive))?;
                tracing::info!("Start uploading {} to {}", source, target);
                let n = self.gateway.put(session, source, target).await?;
                tracing::info!("File transferred ({})", fmt_size(n));
            }
            Directive::ListDir { path } => {
                let session = self.state.session_mut().ok_or_else(|| no_session(directive))?;
                tracing::info!("Printing content of folder {}", path);
                let names = self.gateway.list_directory(session, path).await?;
                for name in &names {
                    tracing::info!("  {}", name);
                }
                report.listings.push((path.clone(), names));
            }
            Directive::Malformed { keyword, expected, found } => {
                return Err(Error::MalformedDirective {
                    keyword: keyword.clone(),
                    expected: *expected,
                    found: *found,
                });
            }
            Directive::Blank | Directive::Unknown(_) => {}
        }
        Ok(())
    }
}

fn no_session(directive: &Directive) -> Error {
    Error::NoActiveSession { command: directive.keyword().to_string() }
}
