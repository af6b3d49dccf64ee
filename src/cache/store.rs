//! Disk-backed store for the aggregated snapshot
//!
//! Provides a `CacheStore` that persists an opaque serialized value under a
//! key and serves it back only while it is younger than a caller-supplied
//! maximum age. Freshness comes from the filesystem's reported modification
//! time, so the store never embeds timestamps in the payload itself.

use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Stores serialized values as files in a single directory
///
/// `set` always overwrites; `get` returns the value only if the file is
/// strictly newer than `now - max_age`. Stale entries are left on disk and
/// simply overwritten by the next successful `set`. Every read failure
/// (missing directory, unreadable file, clock weirdness) is treated as a
/// cache miss, never as an error.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    dir: PathBuf,
}

impl CacheStore {
    /// Creates a CacheStore in the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/lunchglance/` on Linux, or the equivalent path on other
    /// platforms. Returns `None` if no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "lunchglance")?;
        Some(Self {
            dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Creates a CacheStore over a specific directory
    ///
    /// Used for the synced-storage namespace and for tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the path to the cache file for the given key
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Writes a serialized value under `key`, overwriting unconditionally
    pub fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), value)
    }

    /// Reads the value under `key` if it is younger than `max_age`
    ///
    /// Returns `None` when the entry is missing, unreadable, or stale. The
    /// age check is strict: an entry exactly `max_age` old is already stale.
    pub fn get(&self, key: &str, max_age: Duration) -> Option<String> {
        let path = self.entry_path(key);
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        let age = modified.elapsed().ok()?;
        if age < max_age {
            fs::read_to_string(path).ok()
        } else {
            None
        }
    }
}
