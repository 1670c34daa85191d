use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

type ReleaseFn = Box<dyn FnOnce(&Path) + Send>;

enum Backing {
    TempFile(TempPath),
    Custom(ReleaseFn),
}

/// Exclusive handle to downloaded audio on the local filesystem.
///
/// The backing file is removed exactly once, when the handle is released or
/// dropped, including while unwinding. Removal errors are ignored.
pub struct LocalAudio {
    path: PathBuf,
    backing: Option<Backing>,
}

impl LocalAudio {
    pub fn from_temp_path(temp: TempPath) -> Self {
        Self {
            path: temp.to_path_buf(),
            backing: Some(Backing::TempFile(temp)),
        }
    }

    /// Wraps a path whose cleanup is performed by `release`.
    pub fn with_release<F>(path: PathBuf, release: F) -> Self
    where
        F: FnOnce(&Path) + Send + 'static,
    {
        Self {
            path,
            backing: Some(Backing::Custom(Box::new(release))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn release(self) {
        drop(self);
    }
}

impl Drop for LocalAudio {
    fn drop(&mut self) {
        match self.backing.take() {
            Some(Backing::TempFile(temp)) => {
                if let Err(e) = temp.close() {
                    log::debug!("Ignoring failure to remove {}: {e}", self.path.display());
                }
            }
            Some(Backing::Custom(release)) => release(&self.path),
            None => {}
        }
    }
}

impl fmt::Debug for LocalAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAudio").field("path", &self.path).finish()
    }
}
