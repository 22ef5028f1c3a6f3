//! Font storage access
//!
//! The registry never touches the filesystem directly: listing the font
//! directory and opening font files go through a `FontSource`.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Directory listing and byte stream access for font files
pub trait FontSource {
    /// Entry names (not full paths) in `dir`
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Open `path` for sequential reading. The stream is closed when dropped.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;
}

/// Font files on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DirSource;

impl FontSource for DirSource {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        // read_dir order is unspecified
        names.sort();
        Ok(names)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let file = std::fs::File::open(path)?;
        Ok(Box::new(io::BufReader::new(file)))
    }
}

/// Font files held in memory
///
/// Useful for fonts compiled into a binary and for tests. Counts every
/// successful `open` so callers can observe cache behaviour.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
    opens: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file at `path`
    pub fn insert(&mut self, path: impl Into<PathBuf>, data: Vec<u8>) {
        self.files.insert(path.into(), data);
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with_file(mut self, path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        self.insert(path, data);
        self
    }

    /// Number of files opened so far
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl FontSource for MemorySource {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = self
            .files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        if names.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            ));
        }

        names.sort();
        Ok(names)
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        let data = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })?;
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(Cursor::new(data.as_slice())))
    }
}
