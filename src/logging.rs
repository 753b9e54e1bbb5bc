//! Log output.
//!
//! Everything in the crate logs through `tracing`. [`init`] installs a
//! registry with an [`EnvFilter`] and a compact `fmt` layer. Natively the
//! layer writes to stderr; in the browser it writes each event as one
//! `console.log` line, without timestamps (the console adds its own).
//!
//! `RUST_LOG` wins over the configured level when it is set and valid.

use crate::config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LEVEL: &str = "info";

/// Filter from `RUST_LOG`, else from `level`, else [`DEFAULT_LEVEL`].
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber. Returns `false` when one was already set.
pub fn init(config: &LoggingConfig) -> bool {
    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    #[cfg(target_arch = "wasm32")]
    let layer = layer
        .without_time()
        .with_ansi(false)
        .with_writer(console::ConsoleWriter::default);

    #[cfg(not(target_arch = "wasm32"))]
    let layer = layer.with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter(&config.level))
        .with(layer)
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    /// Buffers one formatted event and hands it to the console on drop.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end();
            if !line.is_empty() {
                gloo_console::log!(line.to_string());
            }
        }
    }
}
