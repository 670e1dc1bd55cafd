//! Logging infrastructure
//!
//! The crate logs through `tracing` macros with structured fields; hosts
//! that already run a subscriber need nothing from this module.
//! [`init_tracing`] is a convenience initializer for hosts without one:
//! an env-filtered fmt layer on stderr, plus a daily-rolling file layer
//! when `ACCOUNT_SELECT_LOG_DIR` is set.

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::errors::AppError;

/// Environment variable selecting a directory for rolling file logs.
pub const LOG_DIR_ENV: &str = "ACCOUNT_SELECT_LOG_DIR";

// The non-blocking writer stops once its guard drops; the guard lives for
// the process.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initializes the global tracing subscriber.
///
/// Filter directives come from `RUST_LOG`, defaulting to `info`.
///
/// # Returns
/// * `Ok(())` - Subscriber installed
/// * `Err(AppError)` - A global subscriber was already installed
pub fn init_tracing() -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let result = if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        let appender = tracing_appender::rolling::daily(dir, "account-select.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init()
    } else {
        registry.try_init()
    };

    result.map_err(|e| AppError::Other {
        message: format!("failed to initialize tracing: {}", e),
        source: None,
    })
}
