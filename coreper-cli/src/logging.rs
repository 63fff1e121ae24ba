//! Structured logging for the `coreper` binary.
//!
//! Diagnostics go to `stderr` so reports and tables on `stdout` stay clean.
//! `RUST_LOG` selects the level (default `info`) and `COREPER_LOG_FORMAT`
//! selects `human` or `json` output. The `log` facade is bridged into
//! `tracing`.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "COREPER_LOG_FORMAT";
const DEFAULT_FILTER: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format of the installed fmt layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while installing structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// `COREPER_LOG_FORMAT` held invalid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// `COREPER_LOG_FORMAT` named an unknown format.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
    /// Another global subscriber is already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Reads the requested format from `COREPER_LOG_FORMAT`.
///
/// # Errors
/// Returns [`LoggingError`] when the variable is not valid UTF-8 or names an
/// unknown format.
pub fn format_from_env() -> Result<LogFormat, LoggingError> {
    match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(LogFormat::default()),
        Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
            name: LOG_FORMAT_ENV,
            source,
        }),
    }
}

/// Installs the global subscriber once; later calls return the format chosen
/// by the first.
///
/// # Errors
/// Returns [`LoggingError`] when the format cannot be determined. A
/// subscriber installed by someone else is reported on `stderr` and left in
/// place.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }

    let format = format_from_env()?;
    if let Err(err) = install(format) {
        report_existing_subscriber(&err);
    }
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Best effort: a logger may already own the `log` slot.
    let _ = LogTracer::init();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}

#[expect(
    clippy::print_stderr,
    reason = "the subscriber that would carry this message is not ours"
)]
fn report_existing_subscriber(err: &LoggingError) {
    eprintln!("structured logging already configured elsewhere: {err}");
}
