//! Where asset bytes come from.

use super::LoadError;
use futures::future::{FutureExt, LocalBoxFuture};
use std::collections::HashMap;
use std::path::PathBuf;

/// Fetches raw bytes for a url.
///
/// Futures are `!Send`; everything runs on the render thread.
pub trait AssetSource {
    /// Fetch the bytes behind `url`.
    fn fetch(&self, url: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, LoadError>>;
}

/// Reads urls as paths relative to a root directory.
///
/// Reads are synchronous: the returned future does its blocking `std::fs`
/// read on first poll. Meant for native tools and tests, not for a loop
/// that must keep drawing while assets arrive.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileSource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, LoadError>> {
        let url = url.to_string();
        let path = self.root.join(&url);
        async move {
            std::fs::read(&path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound(url),
                _ => LoadError::Fetch {
                    url,
                    reason: e.to_string(),
                },
            })
        }
        .boxed_local()
    }
}

/// Serves assets from an in-memory bundle.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn insert(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(url.into(), bytes);
    }

    /// Add a file, builder style.
    pub fn with(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(url, bytes);
        self
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'_, Result<Vec<u8>, LoadError>> {
        let result = self
            .files
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(url.to_string()));
        futures::future::ready(result).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with("a.bin", vec![1, 2, 3]);
        assert_eq!(pollster::block_on(source.fetch("a.bin")), Ok(vec![1, 2, 3]));
        assert_eq!(
            pollster::block_on(source.fetch("b.bin")),
            Err(LoadError::NotFound("b.bin".into()))
        );
    }

    #[test]
    fn test_file_source_reads_on_first_poll() {
        let root = std::env::temp_dir();
        let name = format!("ren-harness-{}.bin", std::process::id());
        std::fs::write(root.join(&name), [7u8, 8, 9]).unwrap();

        let source = FileSource::new(&root);
        let result = source.fetch(&name).now_or_never();
        std::fs::remove_file(root.join(&name)).unwrap();
        assert_eq!(result, Some(Ok(vec![7, 8, 9])));
    }

    #[test]
    fn test_file_source_missing_file() {
        let source = FileSource::new(std::env::temp_dir());
        let result = pollster::block_on(source.fetch("ren-harness-missing-asset.glb"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }
}
