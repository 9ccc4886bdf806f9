use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Installs the process-wide tracing subscriber.
///
/// Idempotent: only the first call installs. Filtering honors
/// `RUST_LOG`, defaulting to `info`. Setting `SURVEIL_LOG_JSON=1`
/// switches to JSON line output for log shippers.
pub fn init_logger(service_name: &'static str) {
    LOGGER_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let json = std::env::var("SURVEIL_LOG_JSON").map(|v| v == "1").unwrap_or(false);

        let builder = fmt()
            .with_env_filter(filter)
            .with_target(true) // <-- shows crate/module path
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        if json {
            builder.json().init();
        } else {
            builder.init();
        }

        tracing::info!(service = service_name, "logger initialized");
    });
}
