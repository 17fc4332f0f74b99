//! Console output: structured logs on stderr and an optional spinner.
//!
//! Components never reach for a global spinner. They take a [`Progress`] from
//! their caller and log through `tracing`, whose subscriber is set up once by
//! [`init_logging`].

use std::io::{IsTerminal, Write};
use std::time::Duration;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Progress indicator driven by long running operations.
pub trait Progress {
    fn start(&self, message: &str);
    fn set_message(&self, message: &str);
    fn succeed(&self, message: &str);
    fn fail(&self, message: &str);
}

/// Progress that displays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _message: &str) {}
    fn set_message(&self, _message: &str) {}
    fn succeed(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
}

/// Terminal spinner on stderr. Hidden when stderr is not a terminal.
#[derive(Debug, Clone)]
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new() -> Spinner {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        Spinner { bar }
    }

    /// Writer for the log subscriber, clearing the spinner while a record is printed.
    pub fn writer(&self) -> SpinnerWriter {
        SpinnerWriter { bar: self.bar.clone() }
    }

    fn finish(&self, mark: colored::ColoredString, message: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} {}", mark, message);
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Spinner::new()
    }
}

impl Progress for Spinner {
    fn start(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn succeed(&self, message: &str) {
        self.finish("✔".green(), message);
    }

    fn fail(&self, message: &str) {
        self.finish("✗".red(), message);
    }
}

/// [`MakeWriter`] producing [`SuspendedStderr`] writers.
#[derive(Debug, Clone)]
pub struct SpinnerWriter {
    bar: ProgressBar,
}

impl<'a> MakeWriter<'a> for SpinnerWriter {
    type Writer = SuspendedStderr;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedStderr {
            bar: self.bar.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one log record and prints it to stderr with the spinner suspended.
#[derive(Debug)]
pub struct SuspendedStderr {
    bar: ProgressBar,
    buf: Vec<u8>,
}

impl Write for SuspendedStderr {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        self.bar.suspend(|| {
            let mut stderr = std::io::stderr().lock();
            stderr.write_all(&buf)?;
            stderr.flush()
        })
    }
}

impl Drop for SuspendedStderr {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Maps the number of `-v` flags to the most detailed level shown.
///
/// No flag shows `info` and above, `-v` adds `debug`, `-vv` and more add `trace`.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: u8, spinner: &Spinner) {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbose).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(spinner.writer())
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
