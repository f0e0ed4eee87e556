//! Process-wide logging setup
//!
//! Logging is configured once, from `main`, with an explicit [`LogConfig`].
//! Nothing else installs or replaces the global subscriber.
//!
//! Line format: `- 10/17/2026 03:04:05 PM DEBUG message`

use std::fmt;
use std::sync::Once;

use chrono::Local;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tfmt, Layer};

use crate::cli::error::{CliError, CliResult};

/// Timestamp layout: month/day/year, 12-hour clock with AM/PM.
pub const DATE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

static INIT: Once = Once::new();

/// Logging configuration resolved from the root command's flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub debug: bool,
}

impl LogConfig {
    pub fn level(&self) -> Option<LevelFilter> {
        self.debug.then_some(LevelFilter::DEBUG)
    }
}

/// Level names as printed in log lines; warnings read `WARNING`.
pub fn level_name(level: &Level) -> &'static str {
    if *level == Level::WARN {
        "WARNING"
    } else {
        level.as_str()
    }
}

/// Event formatter producing `- <timestamp> <LEVEL> <message>` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashFormat;

impl<S, N> FormatEvent<S, N> for DashFormat
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
        write!(
            writer,
            "- {} {} ",
            Local::now().format(DATE_FORMAT),
            level_name(event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build the subscriber for `config`, writing to `make_writer`.
///
/// Returns `None` when the configuration asks for no logging.
pub fn subscriber<W>(
    config: &LogConfig,
    make_writer: W,
) -> Option<impl Subscriber + Send + Sync + 'static>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let level = config.level()?;
    let layer = tfmt::layer()
        .with_writer(make_writer)
        .with_ansi(false)
        .event_format(DashFormat)
        .with_filter(level);
    Some(tracing_subscriber::registry().with(layer))
}

/// Install the global subscriber for `config`, at most once per process.
///
/// A no-op when debug logging was not requested.
pub fn init(config: &LogConfig) -> CliResult<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        if let Some(subscriber) = subscriber(config, std::io::stderr) {
            result = subscriber
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()));
        }
    });
    if result.is_ok() {
        tracing::debug!("Debug mode: debug");
    }
    result
}
