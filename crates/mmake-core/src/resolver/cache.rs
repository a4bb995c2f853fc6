//! On-disk cache in front of another resolver.

use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{Content, ResolveError, Resolver};

/// Stores resolved content under `dir`, keyed by the blake3 hash of the
/// reference.
#[derive(Debug, Clone)]
pub struct CachedResolver<R> {
    inner: R,
    dir: PathBuf,
    refresh: bool,
}

impl<R: Resolver> CachedResolver<R> {
    pub fn new(inner: R, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
            refresh: false,
        }
    }

    /// Always fetch from `inner`, overwriting any cached entry.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache entry for `reference`.
    pub fn entry_path(&self, reference: &str) -> PathBuf {
        let hash = blake3::hash(reference.as_bytes()).to_hex().to_string();
        self.dir.join(hash)
    }

    /// Write `content` to `path` and return the stored entry rewound to the
    /// start. Each writer fills its own temp file, so concurrent readers
    /// only ever see a complete entry.
    fn store(&self, path: &Path, mut content: Content) -> Result<File, ResolveError> {
        fs::create_dir_all(&self.dir).map_err(|e| ResolveError::io(&self.dir, e))?;

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| ResolveError::io(&self.dir, e))?;
        io::copy(&mut content, tmp.as_file_mut()).map_err(|e| ResolveError::io(path, e))?;

        let mut file = tmp
            .persist(path)
            .map_err(|e| ResolveError::io(path, e.error))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| ResolveError::io(path, e))?;
        Ok(file)
    }
}

impl<R: Resolver> Resolver for CachedResolver<R> {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        let path = self.entry_path(reference);

        if !self.refresh {
            match File::open(&path) {
                Ok(file) => {
                    tracing::debug!(reference, path = %path.display(), "cache hit");
                    return Ok(Box::new(file));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(ResolveError::io(path, e)),
            }
        }

        let content = self.inner.get(reference)?;
        let file = self.store(&path, content)?;
        tracing::debug!(reference, path = %path.display(), "cached include");

        Ok(Box::new(file))
    }
}
