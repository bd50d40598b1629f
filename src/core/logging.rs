//! Logging Module
//!
//! `log` macros everywhere, bridged into a `tracing` registry that writes JSON
//! to a daily rolling file. Old logs are gzipped in the background.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "dm-copilot.log";
const DEFAULT_FILTER: &str = "info";

/// Where logs go and what else gets installed alongside them.
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub log_dir: PathBuf,
    /// Mirror events to stdout in a pretty format.
    pub stdout: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            stdout: true,
        }
    }
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("dm-copilot").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Initialize logging with a stdout mirror.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered logs are flushed on shutdown.
pub fn init() -> WorkerGuard {
    init_with(LogOptions::default())
}

/// Initialize logging for TUI mode.
///
/// Identical to [`init()`] but omits the stdout layer so nothing is written
/// over the alternate screen.
pub fn init_tui() -> WorkerGuard {
    init_with(LogOptions {
        stdout: false,
        ..LogOptions::default()
    })
}

pub fn init_with(options: LogOptions) -> WorkerGuard {
    let log_dir = options.log_dir;
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = options.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(env_filter())
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    // try_init already bridges `log` when tracing-subscriber's tracing-log
    // feature is on; this covers builds without it.
    let _ = tracing_log::LogTracer::init();

    init_miette();

    // after init so the compressor's own log lines are recorded
    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// `RUST_LOG` when set, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Rolled-over files are `dm-copilot.log.YYYY-MM-DD`; today's stays open.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX)
        && name.len() > LOG_FILE_PREFIX.len()
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}

/// Install miette's report handler for start-up diagnostics.
fn init_miette() {
    let colorize = io::stderr().is_terminal();
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(colorize)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .color(colorize)
                .build(),
        )
    }))
    .ok(); // already set
}
