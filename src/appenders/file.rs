//! Session log file appender

use crate::core::{date_stamp, Appender, LogEvent, LoggerError, Result, Template};
use chrono::{DateTime, Local};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// File name of a session started at `created_at`
pub fn session_file_name(project_name: &str, created_at: &DateTime<Local>) -> String {
    format!("{}_log_{}.log", project_name, date_stamp(created_at))
}

/// The file of one `init`/`exit` session.
///
/// The file is held under an exclusive advisory lock until it is closed, and
/// every event is flushed as soon as it is written.
pub struct FileAppender {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    template: Template,
}

impl FileAppender {
    /// Open `<dir>/<project_name>_log_<date>.log` for a new session
    pub fn create(dir: &Path, project_name: &str, template: Template) -> Result<Self> {
        let path = dir.join(session_file_name(project_name, &Local::now()));
        Self::open(path, template)
    }

    pub fn open(path: impl Into<PathBuf>, template: Template) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;

        file.try_lock_exclusive()
            .map_err(|_| LoggerError::file_lock(path.display().to_string()))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
            template,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush, unlock and close the file, returning its path
    pub fn close(mut self) -> Result<PathBuf> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            FileExt::unlock(&file)?;
        }
        Ok(std::mem::take(&mut self.path))
    }
}

impl Appender for FileAppender {
    fn append(&mut self, event: &LogEvent) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut line = self.template.render(event);
        line.push('\n');

        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}

/// Gzip a closed log file next to itself as `<name>.log.gz`.
///
/// An existing `<name>.log.gz` (an earlier session started in the same second)
/// is kept: the new data is added after it as another gzip member. The original
/// is removed only once the compressed copy is complete.
pub fn compress_file(path: &Path) -> Result<PathBuf> {
    let gz_path = path.with_extension("log.gz");
    let temp_gz_path = path.with_extension("log.gz.tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    if let Err(e) = gzip_append(&gz_path, &mut reader, output) {
        let _ = fs::remove_file(&temp_gz_path);
        return Err(LoggerError::io_operation(
            "compress log file",
            format!("Failed to compress {}", path.display()),
            e,
        ));
    }

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(gz_path)
}

fn gzip_append(existing: &Path, reader: &mut impl Read, output: File) -> std::io::Result<()> {
    let mut output = BufWriter::with_capacity(64 * 1024, output);
    if existing.exists() {
        std::io::copy(&mut File::open(existing)?, &mut output)?;
    }

    let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
    std::io::copy(reader, &mut encoder)?;
    encoder.finish()?.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Message, FILE_TEMPLATE};
    use chrono::TimeZone;
    use flate2::read::{GzDecoder, MultiGzDecoder};
    use tempfile::TempDir;

    #[test]
    fn test_session_file_name() {
        let ts = Local
            .with_ymd_and_hms(2024, 3, 7, 8, 9, 10)
            .single()
            .expect("valid datetime");
        assert_eq!(
            session_file_name("project", &ts),
            "project_log_2024-3-7@8-9-10.log"
        );
    }

    #[test]
    fn test_lines_are_written_and_flushed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut file =
            FileAppender::create(temp_dir.path(), "demo", Template::new(FILE_TEMPLATE)).unwrap();

        file.append(&LogEvent::new(0, LogLevel::Info, "run", Message::from("one")))
            .unwrap();
        file.append(&LogEvent::new(1, LogLevel::Debug, "run", Message::from("two")))
            .unwrap();

        // Readable without closing: each event is flushed
        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[0-") && lines[0].ends_with("-INFO]\t[run]\tone "));
        assert!(lines[1].ends_with("-DEBUG]\t[run]\ttwo "));
    }

    #[test]
    fn test_second_open_is_locked_out() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("locked.log");

        let first = FileAppender::open(&path, Template::new(FILE_TEMPLATE)).unwrap();
        let second = FileAppender::open(&path, Template::new(FILE_TEMPLATE));
        assert!(matches!(second, Err(LoggerError::FileLockError { .. })));

        first.close().unwrap();
        assert!(FileAppender::open(&path, Template::new(FILE_TEMPLATE)).is_ok());
    }

    #[test]
    fn test_compress_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app_log.log");
        fs::write(&path, "line one\nline two\n").unwrap();

        let gz_path = compress_file(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(gz_path, temp_dir.path().join("app_log.log.gz"));

        let mut decoded = String::new();
        GzDecoder::new(File::open(&gz_path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "line one\nline two\n");
    }

    #[test]
    fn test_compress_keeps_earlier_archive() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app_log.log");

        fs::write(&path, "first session\n").unwrap();
        let gz_path = compress_file(&path).unwrap();
        fs::write(&path, "second session\n").unwrap();
        assert_eq!(compress_file(&path).unwrap(), gz_path);
        assert!(!path.exists());

        let mut decoded = String::new();
        MultiGzDecoder::new(File::open(&gz_path).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "first session\nsecond session\n");
    }
}
