// src/system/transcript.rs

use crate::constants::{TRANSCRIPT_EXTENSION, TRANSCRIPT_PREFIX};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A plain-text copy of everything shown during a session.
///
/// Failures never interrupt the session: they are logged and the transcript goes quiet.
#[derive(Debug)]
pub struct Transcript {
    log_root: PathBuf,
    current: Option<(PathBuf, BufWriter<File>)>,
}

impl Transcript {
    /// Prepares transcripts under `log_root`. No file is opened until [`Self::rotate`].
    pub fn new(log_root: impl Into<PathBuf>) -> Self {
        Self {
            log_root: log_root.into(),
            current: None,
        }
    }

    /// The file currently being written, if any.
    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|(path, _)| path.as_path())
    }

    /// Closes the current file and opens `GAMLaunch_<timestamp>.txt`.
    pub fn rotate(&mut self) {
        self.flush_current();

        if let Err(e) = fs::create_dir_all(&self.log_root) {
            log::warn!(
                "Cannot create transcript directory '{}': {}",
                self.log_root.display(),
                e
            );
            return;
        }
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.log_root.join(format!(
            "{}_{}.{}",
            TRANSCRIPT_PREFIX, stamp, TRANSCRIPT_EXTENSION
        ));
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                log::debug!("Transcript started: {}", path.display());
                self.current = Some((path, BufWriter::new(file)));
            }
            Err(e) => log::warn!("Cannot open transcript '{}': {}", path.display(), e),
        }
    }

    /// Appends one line and flushes it, so the file is complete even if the
    /// launcher is killed mid-session.
    pub fn record(&mut self, line: &str) {
        if let Some((path, writer)) = &mut self.current
            && let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush())
        {
            log::warn!("Transcript write to '{}' failed: {}", path.display(), e);
            self.current = None;
        }
    }

    /// Flushes and closes the transcript.
    pub fn close(mut self) {
        self.flush_current();
    }

    fn flush_current(&mut self) {
        if let Some((path, mut writer)) = self.current.take()
            && let Err(e) = writer.flush()
        {
            log::warn!("Transcript flush of '{}' failed: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lines_are_written_on_close() {
        let dir = TempDir::new().unwrap();
        let mut transcript = Transcript::new(dir.path().join("Logs"));
        transcript.record("dropped: no file yet");
        transcript.rotate();
        transcript.record("Configured Environments:");
        transcript.record("[1] Acme - C:\\Clients\\Acme");
        let path = transcript.current_path().unwrap().to_path_buf();
        transcript.close();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Configured Environments:\n[1] Acme - C:\\Clients\\Acme\n");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("GAMLaunch_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_each_line_reaches_disk_before_close() {
        let dir = TempDir::new().unwrap();
        let mut transcript = Transcript::new(dir.path());
        transcript.rotate();
        transcript.record("GAM [Acme]: gam info domain");
        let path = transcript.current_path().unwrap().to_path_buf();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "GAM [Acme]: gam info domain\n"
        );

        transcript.record("Exit code: 1");
        assert!(fs::read_to_string(&path).unwrap().ends_with("Exit code: 1\n"));
        transcript.close();
    }
}
