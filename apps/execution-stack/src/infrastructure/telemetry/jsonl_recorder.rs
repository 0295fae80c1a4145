//! Append-only JSON Lines recorder.
//!
//! Each record is written as a single `write_all` of the full line while
//! holding the file mutex, so concurrent appends never interleave. A torn
//! tail is fenced off with a newline before the next record: on open when the
//! process died mid-write, and on the next append when a write failed in this
//! process. [`read_records`] skips the fragment.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{TelemetryError, TelemetryRecord, TelemetrySink};
use crate::domain::shared::TradingMode;

/// Path of the stream for `mode` under `base_dir`.
#[must_use]
pub fn stream_path(base_dir: &Path, mode: TradingMode) -> PathBuf {
    base_dir.join(format!("execution_quality_{}.jsonl", mode.stream_key()))
}

fn io_error(path: &Path, source: io::Error) -> TelemetryError {
    TelemetryError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Durable telemetry sink for one trading mode.
#[derive(Debug)]
pub struct JsonlTelemetryRecorder {
    path: PathBuf,
    mode: TradingMode,
    fsync: bool,
    file: Arc<Mutex<StreamWriter<File>>>,
}

impl JsonlTelemetryRecorder {
    /// Open (or create) the stream for `mode` under `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Io` if the directory or file cannot be
    /// created, or the tail cannot be inspected.
    pub fn open(
        base_dir: impl AsRef<Path>,
        mode: TradingMode,
        fsync: bool,
    ) -> Result<Self, TelemetryError> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(|e| io_error(base_dir, e))?;

        let path = stream_path(base_dir, mode);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;

        if fence_torn_tail(&mut file).map_err(|e| io_error(&path, e))? {
            tracing::warn!(path = %path.display(), "Fenced torn record at end of telemetry stream");
        }

        tracing::debug!(path = %path.display(), mode = %mode, fsync, "Telemetry stream opened");

        Ok(Self {
            path,
            mode,
            fsync,
            file: Arc::new(Mutex::new(StreamWriter::new(file))),
        })
    }

    /// Stream file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Trading mode this stream belongs to.
    #[must_use]
    pub const fn mode(&self) -> TradingMode {
        self.mode
    }
}

/// Writes a newline if the file is non-empty and does not end with one.
/// Returns true if a fence was written.
fn fence_torn_tail(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0_u8; 1];
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(false);
    }
    file.write_all(b"\n")?;
    Ok(true)
}

/// Sink the stream writer can flush to stable storage.
trait Durable: Write {
    fn sync(&mut self) -> io::Result<()>;
}

impl Durable for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

/// Line writer that remembers a failed write.
///
/// After any error the stream may end in a partial line, so the next line is
/// preceded by a newline. A spurious fence only adds a blank line.
#[derive(Debug)]
struct StreamWriter<W> {
    inner: W,
    needs_fence: bool,
}

impl<W: Durable> StreamWriter<W> {
    const fn new(inner: W) -> Self {
        Self {
            inner,
            needs_fence: false,
        }
    }

    fn append(&mut self, line: &[u8], fsync: bool) -> io::Result<()> {
        let result = self.write_line(line, fsync);
        self.needs_fence = result.is_err();
        result
    }

    fn write_line(&mut self, line: &[u8], fsync: bool) -> io::Result<()> {
        if self.needs_fence {
            let mut fenced = Vec::with_capacity(line.len() + 1);
            fenced.push(b'\n');
            fenced.extend_from_slice(line);
            self.inner.write_all(&fenced)?;
        } else {
            self.inner.write_all(line)?;
        }
        if fsync {
            self.inner.sync()?;
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetrySink for JsonlTelemetryRecorder {
    async fn append(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let file = Arc::clone(&self.file);
        let path = self.path.clone();
        let fsync = self.fsync;

        tokio::task::spawn_blocking(move || -> Result<(), TelemetryError> {
            let mut writer = file.lock().unwrap_or_else(PoisonError::into_inner);
            writer.append(&line, fsync).map_err(|e| {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Telemetry write failed, next record will be fenced"
                );
                io_error(&path, e)
            })
        })
        .await
        .map_err(|e| TelemetryError::Task {
            message: e.to_string(),
        })?
    }
}

/// Read every parseable record from a stream.
///
/// A missing file yields no records. Unparseable lines, such as a fenced
/// torn record, are skipped with a warning.
///
/// # Errors
///
/// Returns `TelemetryError::Io` if the file exists but cannot be read.
pub fn read_records(path: &Path) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(path, e)),
    };

    let mut records = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TelemetryRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = number + 1,
                    error = %e,
                    "Skipping unparseable telemetry line"
                );
            }
        }
    }
    Ok(records)
}
