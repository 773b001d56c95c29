//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that writes to stderr and to a size-rotated
//! log file, keeping the most recent lines in an in-memory circular buffer.
//! `log` records are bridged into `tracing`, so crates using either facade
//! end up in the same file.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors raised while setting up or writing the log
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("logger is not initialized")]
    NotInitialized,

    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

pub type LoggerResult<T> = Result<T, LoggerError>;

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingConfig {
    /// Rotate once the active file reaches this many bytes
    pub max_file_bytes: u64,
    /// Number of files kept on disk, active file included
    pub max_files: usize,
    /// Number of lines kept in memory
    pub buffer_lines: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_lines: 500,
        }
    }
}

struct RollingFile {
    dir: PathBuf,
    stem: String,
    config: RollingConfig,
    file: File,
    written: u64,
    recent: VecDeque<String>,
    partial: String,
}

impl RollingFile {
    fn open(dir: &Path, stem: &str, config: RollingConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", stem));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            config,
            file,
            written,
            recent: VecDeque::with_capacity(config.buffer_lines),
            partial: String::new(),
        })
    }

    fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.stem))
        } else {
            self.dir.join(format!("{}.{}.log", self.stem, index))
        }
    }

    /// app.log -> app.1.log -> app.2.log ..., dropping the oldest
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let keep = self.config.max_files.max(1);

        let oldest = self.path_for(keep - 1);
        if keep > 1 && oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..keep.saturating_sub(1)).rev() {
            let from = self.path_for(index);
            if from.exists() {
                fs::rename(&from, self.path_for(index + 1))?;
            }
        }

        // With a single file there is nothing to shift into, truncate instead
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path_for(0))?;
        self.written = 0;
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.config.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.config.buffer_lines == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.recent.len() == self.config.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.trim_end().to_string());
        }
    }
}

/// Shared handle to the rolling file, usable as a `tracing` writer
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<RollingFile>>,
}

impl RollingWriter {
    pub fn new(dir: impl AsRef<Path>, stem: &str, config: RollingConfig) -> LoggerResult<Self> {
        let file = RollingFile::open(dir.as_ref(), stem, config)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(file)),
        })
    }

    /// Path of the file currently being written
    pub fn active_path(&self) -> PathBuf {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.path_for(0)
    }

    /// The most recent lines, oldest first
    pub fn recent(&self, limit: usize) -> Vec<String> {
        let guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let skip = guard.recent.len().saturating_sub(limit);
        guard.recent.iter().skip(skip).cloned().collect()
    }

    /// Write a single formatted line, bypassing the subscriber
    pub fn write_line(&self, level: &str, message: &str) -> LoggerResult<()> {
        let line = format!(
            "{} {:>5} {}\n",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
            level,
            message
        );
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.write_bytes(line.as_bytes())?;
        Ok(())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        guard.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Initialize the global logger with default limits.
///
/// Log files live in `log_dir` and are named after `app_name`.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> LoggerResult<()> {
    init_logger_with(log_dir, app_name, RollingConfig::default())
}

/// Initialize the global logger with explicit limits.
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: RollingConfig,
) -> LoggerResult<()> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let writer = RollingWriter::new(log_dir, app_name, config)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer.clone()),
        )
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    let path = writer.active_path();
    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::debug!(?config, "rolling logger configured");
    log::info!("logging to {}", path.display());
    Ok(())
}

fn global() -> LoggerResult<&'static RollingWriter> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> LoggerResult<()> {
    global()?.write_line("INFO", message)
}

pub fn warn(message: &str) -> LoggerResult<()> {
    global()?.write_line("WARN", message)
}

pub fn error(message: &str) -> LoggerResult<()> {
    global()?.write_line("ERROR", message)
}

/// Recent lines from the global buffer (empty before init)
pub fn recent_lines(limit: usize) -> Vec<String> {
    LOGGER.get().map(|w| w.recent(limit)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RollingConfig {
        RollingConfig {
            max_file_bytes: 64,
            max_files: 3,
            buffer_lines: 4,
        }
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "app", small_config()).unwrap();

        writer.write_line("INFO", "hello").unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(content.contains("INFO hello"));
    }

    #[test]
    fn test_rotation_keeps_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "app", small_config()).unwrap();

        for i in 0..20 {
            writer.write_line("INFO", &format!("line number {}", i)).unwrap();
        }

        assert!(dir.path().join("app.log").exists());
        assert!(dir.path().join("app.1.log").exists());
        assert!(dir.path().join("app.2.log").exists());
        assert!(!dir.path().join("app.3.log").exists());

        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert!(active.contains("line number 19"));
    }

    #[test]
    fn test_buffer_is_circular() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(dir.path(), "app", small_config()).unwrap();

        for i in 0..6 {
            writer.write_line("INFO", &format!("m{}", i)).unwrap();
        }

        let recent = writer.recent(10);
        assert_eq!(recent.len(), 4);
        assert!(recent[0].ends_with("m2"));
        assert!(recent[3].ends_with("m5"));

        let last_two = writer.recent(2);
        assert!(last_two[0].ends_with("m4"));
    }

    #[test]
    fn test_partial_writes_join_into_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::new(dir.path(), "app", RollingConfig::default()).unwrap();

        writer.write_all(b"first ").unwrap();
        writer.write_all(b"half\nsecond\n").unwrap();

        assert_eq!(writer.recent(5), vec!["first half".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_helpers_require_init() {
        // The global logger is never initialized in unit tests
        assert!(matches!(info("x"), Err(LoggerError::NotInitialized)));
        assert!(recent_lines(3).is_empty());
    }
}
