//! Where referenced files are read from.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Read access to the files a manifest may reference.
///
/// Names are bare file names relative to the source root; the resolver has
/// already rejected anything that could leave it.
pub trait FileSource {
    /// Read the raw bytes of `name`.
    ///
    /// A missing file must surface as [`io::ErrorKind::NotFound`].
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Files under an input root directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for DirSource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.root.join(name))
    }
}

/// In-memory files, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, builder style.
    #[must_use]
    pub fn with_file(mut self, name: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(name, contents);
        self
    }

    pub fn insert(&mut self, name: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(name.to_string(), contents.into());
    }
}

impl FileSource for MemorySource {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{name} not found"))
        })
    }
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read(name)
    }
}
