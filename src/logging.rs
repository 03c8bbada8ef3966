//! Browser console output for `tracing` events
//!
//! The session layer logs through `tracing`. In the browser there is no
//! stdout, so formatted events are forwarded to the console through
//! `leptos::logging`, warnings and errors at their own console level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

type Sink = fn(Level, &str);

/// `MakeWriter` emitting one console entry per event
#[derive(Clone, Copy)]
pub struct BrowserConsole {
    sink: Sink,
}

impl Default for BrowserConsole {
    fn default() -> Self {
        Self { sink: to_console }
    }
}

fn to_console(level: Level, line: &str) {
    match level {
        Level::ERROR => leptos::logging::error!("{}", line),
        Level::WARN => leptos::logging::warn!("{}", line),
        _ => leptos::logging::log!("{}", line),
    }
}

/// Buffers one formatted event and flushes it to the sink on drop
pub struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
    sink: Sink,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            (self.sink)(self.level, line);
        }
    }
}

impl<'a> MakeWriter<'a> for BrowserConsole {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        self.line(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.line(*meta.level())
    }
}

impl BrowserConsole {
    fn line(&self, level: Level) -> ConsoleLine {
        ConsoleLine {
            level,
            buf: Vec::new(),
            sink: self.sink,
        }
    }
}

/// Install the console subscriber. The filter comes from `RUST_LOG` at build
/// time, defaulting to `info`.
pub fn init_browser_logging() {
    let filter = EnvFilter::try_new(option_env!("RUST_LOG").unwrap_or("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // No clock in the browser; the console stamps entries itself
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(BrowserConsole::default())
        .with_ansi(false)
        .without_time()
        .try_init();

    if installed.is_err() {
        leptos::logging::warn!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    thread_local! {
        static LINES: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn record(level: Level, line: &str) {
        LINES.with(|lines| lines.borrow_mut().push((level, line.to_string())));
    }

    fn captured() -> Vec<(Level, String)> {
        LINES.with(|lines| lines.borrow_mut().drain(..).collect())
    }

    #[test]
    fn test_events_reach_console_at_their_level() {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(BrowserConsole { sink: record })
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Session restored for user: u1");
            tracing::warn!("Stored token rejected, clearing it");
            tracing::error!("Could not persist token");
        });

        let lines = captured();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].0, Level::INFO);
        assert!(lines[0].1.contains("Session restored for user: u1"));
        assert_eq!(lines[1].0, Level::WARN);
        assert!(lines[1].1.contains("Stored token rejected"));
        assert_eq!(lines[2].0, Level::ERROR);
        assert!(!lines[2].1.ends_with('\n'));
    }

    #[test]
    fn test_split_writes_become_one_entry() {
        use std::io::Write;

        let console = BrowserConsole { sink: record };
        {
            let mut line = console.make_writer();
            line.write_all(b"Login failed ").unwrap();
            line.write_all(b"for a@b.com\n").unwrap();
        }
        drop(console.make_writer());

        assert_eq!(
            captured(),
            vec![(Level::INFO, "Login failed for a@b.com".to_string())]
        );
    }
}
