//! Download sinks — where a finished file is handed off.
//!
//! The HTTP layer collects the file in memory and streams it back as an attachment;
//! `DirectorySink` additionally archives exports on disk when configured.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedFile {
    pub filename: String,
    pub size_bytes: usize,
    /// On-disk location, for sinks that write to a filesystem.
    pub location: Option<PathBuf>,
}

#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<SavedFile>;
}

/// Keeps files in memory until the caller takes them.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.files.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// Removes and returns the most recent file saved under `filename`.
    pub fn take(&self, filename: &str) -> Option<Vec<u8>> {
        let mut files = self.files.lock();
        let index = files.iter().rposition(|(name, _)| name == filename)?;
        Some(files.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<SavedFile> {
        self.files.lock().push((filename.to_string(), bytes.to_vec()));
        Ok(SavedFile {
            filename: filename.to_string(),
            size_bytes: bytes.len(),
            location: None,
        })
    }
}

/// Writes files into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<SavedFile> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write unsafe filename '{filename}'"),
            ));
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), size = bytes.len(), "export archived");
        Ok(SavedFile {
            filename: filename.to_string(),
            size_bytes: bytes.len(),
            location: Some(path),
        })
    }
}

/// Saves to `primary` and copies to `mirror`. A mirror failure is logged, not returned.
pub struct MirrorSink<'a> {
    pub primary: &'a dyn DownloadSink,
    pub mirror: &'a dyn DownloadSink,
}

#[async_trait]
impl<'a> DownloadSink for MirrorSink<'a> {
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<SavedFile> {
        let saved = self.primary.save(filename, bytes).await?;
        if let Err(e) = self.mirror.save(filename, bytes).await {
            warn!(filename, error = %e, "failed to mirror export");
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink_take() {
        let sink = MemorySink::new();
        let saved = sink.save("a.pdf", b"%PDF").await.unwrap();
        assert_eq!(saved.size_bytes, 4);
        assert_eq!(sink.filenames(), vec!["a.pdf".to_string()]);
        assert_eq!(sink.take("a.pdf"), Some(b"%PDF".to_vec()));
        assert!(sink.take("a.pdf").is_none());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));
        let saved = sink.save("Resume-jane.pdf", b"pdf-bytes").await.unwrap();
        let path = saved.location.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"pdf-bytes");
    }

    #[tokio::test]
    async fn test_directory_sink_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let err = sink.save("../escape.pdf", b"x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_mirror_failure_does_not_fail_save() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the directory should be makes every mirror write fail.
        let blocker = dir.path().join("blocked");
        std::fs::write(&blocker, b"").unwrap();

        let memory = MemorySink::new();
        let archive = DirectorySink::new(&blocker);
        let sink = MirrorSink {
            primary: &memory,
            mirror: &archive,
        };
        assert!(sink.save("Resume-x.pdf", b"data").await.is_ok());
        assert_eq!(memory.take("Resume-x.pdf"), Some(b"data".to_vec()));
    }
}
