//! Write-once output files.

use crate::format::FormatError;
use crate::noise::{GeneratorError, InstanceError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised by the batch drivers.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Filesystem failure on a specific path.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input data directory does not exist.
    #[error("data directory {} does not exist", .0.display())]
    MissingDataDir(PathBuf),

    /// A model could not be serialized.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// An instance file could not be read.
    #[error(transparent)]
    Instance(#[from] InstanceError),

    /// An instance could not be generated.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl BatchError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        BatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// An output directory that exists on disk.
#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Creates the directory (and parents) if absent.
    pub fn prepare(path: impl Into<PathBuf>) -> Result<Self, BatchError> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|e| BatchError::io(&path, e))?;
        Ok(Self { path })
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside the directory.
    pub fn join(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.path.join(file_name)
    }
}

/// What [`write_once`] did with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was created and filled.
    Written,
    /// The file already existed and was left untouched.
    Skipped,
}

/// Creates `path` exclusively and fills it with `write`.
///
/// An existing file is skipped without calling `write`, so re-running a
/// batch only produces what is missing, and two writers racing for the
/// same path cannot both generate it. If `write` fails, the partial file
/// is removed so that the next run retries it.
pub fn write_once<F>(path: &Path, write: F) -> Result<WriteOutcome, BatchError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), BatchError>,
{
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            info!(path = %path.display(), "exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }
        Err(e) => return Err(BatchError::io(path, e)),
    };

    let mut writer = BufWriter::new(file);
    let result = write(&mut writer).and_then(|()| {
        writer.flush().map_err(|e| BatchError::io(path, e))
    });
    match result {
        Ok(()) => {
            info!(path = %path.display(), "written");
            Ok(WriteOutcome::Written)
        }
        Err(e) => {
            drop(writer);
            let _ = fs::remove_file(path);
            Err(e)
        }
    }
}

/// Paths written and skipped by a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Newly created files.
    pub written: Vec<PathBuf>,
    /// Files that already existed.
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    /// Files the run considered.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }

    pub(crate) fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_creates_nested_dir() {
        let root = tempfile::tempdir().unwrap();
        let out = OutputDir::prepare(root.path().join("a/b/instances")).unwrap();
        assert!(out.path().is_dir());
        assert_eq!(out.join("x.mps"), root.path().join("a/b/instances/x.mps"));
    }

    #[test]
    fn test_prepare_fails_on_file() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        assert!(matches!(
            OutputDir::prepare(blocker.join("sub")),
            Err(BatchError::Io { .. })
        ));
    }

    #[test]
    fn test_write_once_then_skip() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("out.txt");

        let first = write_once(&path, |w| {
            w.write_all(b"first").map_err(|e| BatchError::io(&path, e))
        })
        .unwrap();
        assert_eq!(first, WriteOutcome::Written);

        let mut called = false;
        let second = write_once(&path, |_| {
            called = true;
            Ok(())
        })
        .unwrap();
        assert_eq!(second, WriteOutcome::Skipped);
        assert!(!called);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_failed_write_removes_file() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("broken.txt");
        let result = write_once(&path, |_| Err(BatchError::MissingDataDir("nowhere".into())));
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_parent_is_error() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join("missing/out.txt");
        assert!(matches!(
            write_once(&path, |_| Ok(())),
            Err(BatchError::Io { .. })
        ));
    }

    #[test]
    fn test_report_record() {
        let mut report = BatchReport::default();
        report.record("a".into(), WriteOutcome::Written);
        report.record("b".into(), WriteOutcome::Skipped);
        assert_eq!(report.written, vec![PathBuf::from("a")]);
        assert_eq!(report.skipped, vec![PathBuf::from("b")]);
        assert_eq!(report.total(), 2);
    }
}
