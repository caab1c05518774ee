// sftpbatch Logging
//
// Console: "<YYYY-MM-DD HH:MM:SS.ffffff> [LEVEL] message"
// Log file (sftmLogFile): russh / russh-sftp diagnostics only
//
// RUST_LOG=debug sftpbatch control.txt   → also shows session internals

use std::fmt;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::RunnerConfig;

const CONSOLE_FILTER: &str   = "info,russh=warn,russh_sftp=warn";
const TRANSPORT_FILTER: &str = "off,russh=info,russh_sftp=info";

pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        write!(writer, "{} [{}] ", now, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init(config: &RunnerConfig) {
    let console = tracing_subscriber::fmt::layer()
        .event_format(ConsoleFormat)
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .with_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(CONSOLE_FILTER))
        );

    let mut open_error = None;
    let transport = match &config.log_file {
        Some(path) => match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(EnvFilter::new(TRANSPORT_FILTER))
            ),
            Err(e) => {
                open_error = Some(format!("{}: {}", path.display(), e));
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(transport)
        .init();

    if let Some(e) = open_error {
        tracing::warn!("Transport log file disabled, cannot open {}", e);
    }
}
