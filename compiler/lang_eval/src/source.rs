//! Where linked scripts come from.
//!
//! `linker.link`, `linker.bindLibrary` and `linker.include` resolve their
//! argument against `$LANG_PATH` and ask the host's [`SourceLoader`] for the
//! text. The CLI reads the filesystem; tests and embedding hosts register
//! sources in memory.

use std::path::{Component, Path, PathBuf};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Supplies the source text of linked scripts.
pub trait SourceLoader: Send + Sync {
    /// Text of the script at `path`, `None` if it does not exist.
    fn load(&self, path: &Path) -> Option<String>;
}

/// Reads scripts from disk.
#[derive(Copy, Clone, Debug, Default)]
pub struct FilesystemLoader;

impl SourceLoader for FilesystemLoader {
    fn load(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// Serves scripts registered up front, keyed by normalized path.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    files: RwLock<FxHashMap<PathBuf, String>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryLoader::insert`].
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&self, path: impl AsRef<Path>, source: impl Into<String>) {
        self.files
            .write()
            .insert(normalize_path(path.as_ref()), source.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Option<String> {
        self.files.read().get(&normalize_path(path)).cloned()
    }
}

/// Lexically collapse `.` and `..` components. Does not touch the
/// filesystem, so it works for in-memory paths too.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
