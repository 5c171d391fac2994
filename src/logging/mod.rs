pub mod decision_log;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

static INIT: OnceCell<()> = OnceCell::new();

/// One-time process-wide logging setup, performed explicitly during startup
/// rather than lazily on first use. Returns the appender guard, which must
/// stay alive for the life of the process; repeat calls are no-ops.
pub fn init(log_dir: &str) -> Option<WorkerGuard> {
    if INIT.set(()).is_err() {
        return None;
    }
    let log_file = rolling::hourly(log_dir, "streamads.json");
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().with_writer(non_blocking));
    tracing::subscriber::set_global_default(subscriber)
        .expect("Unable to set global tracing subscriber");
    Some(guard)
}
