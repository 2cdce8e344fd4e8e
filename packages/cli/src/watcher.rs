use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Failed to create watcher: {0}")]
    CreateError(#[from] notify::Error),

    #[error("Cannot watch {0}: it has no parent directory")]
    NoParent(PathBuf),
}

pub type WatcherResult<T> = Result<T, WatcherError>;

/// Watches one source file.
///
/// The parent directory is watched rather than the file itself so that editors
/// which save by replacing the file keep being noticed.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    file_name: PathBuf,
}

impl SourceWatcher {
    pub fn new(path: &Path) -> WatcherResult<Self> {
        let parent = match path.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => return Err(WatcherError::NoParent(path.to_path_buf())),
        };
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| WatcherError::NoParent(path.to_path_buf()))?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            file_name,
        })
    }

    /// Wait up to `timeout` for the file to change.
    ///
    /// Returns `Some(true)` on a change, `Some(false)` on timeout and `None`
    /// once the watcher has shut down.
    pub fn wait_for_change(&self, timeout: Duration) -> Option<bool> {
        match self.receiver.recv_timeout(timeout) {
            Ok(Ok(event)) => Some(self.concerns_file(&event)),
            Ok(Err(_)) => Some(false),
            Err(RecvTimeoutError::Timeout) => Some(false),
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn concerns_file(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(self.file_name.as_os_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_source_watcher_sees_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.jsx");
        fs::write(&path, "").unwrap();

        let watcher = SourceWatcher::new(&path).unwrap();

        let target = path.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            fs::write(target, "<ContentLoader />").unwrap();
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = false;
        while Instant::now() < deadline && !seen {
            seen = watcher.wait_for_change(Duration::from_millis(200)) == Some(true);
        }
        assert!(seen);
    }

    #[test]
    fn test_source_watcher_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Loader.jsx");
        fs::write(&path, "").unwrap();

        let watcher = SourceWatcher::new(&path).unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        let deadline = Instant::now() + Duration::from_millis(500);
        while Instant::now() < deadline {
            assert_ne!(watcher.wait_for_change(Duration::from_millis(50)), Some(true));
        }
    }
}
