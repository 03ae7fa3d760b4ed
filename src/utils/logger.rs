use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::SchedulerResult;

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_LOG_DIRECTIVES: &str = "info,scheduler=debug";

/// Installs a global `tracing` subscriber so the `debug!`/`warn!` events the
/// placement engine emits (one per call, one per diagnosed `Warning`) reach
/// stderr. Purely an ambient concern for the caller to opt into at process
/// start — `generate_schedule` never calls this itself and behaves
/// identically whether or not a subscriber is installed.
///
/// Idempotent: a second call is a harmless no-op.
pub fn init_logging() -> SchedulerResult<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
                .map_err(|err| {
                    crate::error::SchedulerError::validation(format!(
                        "failed to parse log directives: {err}"
                    ))
                })?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(UtcTime::rfc_3339()),
                )
                .init();

            Ok(())
        })
        .map(|_| ())
}
