//! Log output to stdout and to a per-mode log file.

use std::path::Path;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::Mode;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,jinrishici_notify=debug";

/// Install the global subscriber.
///
/// Events go to stdout and to `jinrishici.<mode>.log` inside `dir`. Records
/// emitted through the `log` macros are bridged into the same subscriber.
/// Keep the returned guard alive until exit so buffered lines reach the file.
pub fn init(mode: Mode, dir: &Path) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(dir, mode.log_file_name());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Subscriber;
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_FILTER;

    /// In-memory log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Subscriber using the production filter that writes into a buffer.
    ///
    /// Attach it with `WithSubscriber::with_subscriber`. `log` records reach it
    /// through the global `tracing-log` bridge, installed here on first use.
    pub(crate) fn capture_logs() -> (LogBuffer, impl Subscriber + Send + Sync + 'static) {
        let _ = tracing_subscriber::util::SubscriberInitExt::try_init(
            tracing_subscriber::registry(),
        );
        log::set_max_level(log::LevelFilter::Trace);

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_FILTER))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (buffer, subscriber)
    }
}
