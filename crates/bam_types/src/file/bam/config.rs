//! Import configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cache::{DecompressionCache, Decompressor, ZlibDecompressor};

/// Controls how wrapped containers are expanded.
///
/// # Examples
///
/// ```
/// use bam_types::file::bam::ImportConfig;
///
/// // Decompress into memory with zlib
/// let config = ImportConfig::default();
/// assert!(config.cache_dir.is_none());
///
/// // Persist decompressed containers
/// let config = ImportConfig::new("cache");
/// assert!(config.cache().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct ImportConfig {
	/// Directory receiving decompressed containers, `None` keeps them in memory
	pub cache_dir: Option<PathBuf>,

	/// Block-decompression capability, `None` when unavailable
	pub decompressor: Option<Arc<dyn Decompressor>>,
}

impl Default for ImportConfig {
	fn default() -> Self {
		Self::in_memory()
	}
}

impl ImportConfig {
	/// Creates a configuration caching decompressed containers in `cache_dir`.
	pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
		Self {
			cache_dir: Some(cache_dir.into()),
			decompressor: Some(Arc::new(ZlibDecompressor)),
		}
	}

	/// Creates a configuration decompressing into memory.
	pub fn in_memory() -> Self {
		Self {
			cache_dir: None,
			decompressor: Some(Arc::new(ZlibDecompressor)),
		}
	}

	/// Creates a configuration without a decompressor. Wrapped containers
	/// only load when already cached.
	pub fn without_decompressor() -> Self {
		Self {
			cache_dir: None,
			decompressor: None,
		}
	}

	/// Sets the cache directory.
	pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
		self.cache_dir = Some(dir.as_ref().to_path_buf());
		self
	}

	/// Sets the decompressor.
	pub fn with_decompressor(mut self, decompressor: Arc<dyn Decompressor>) -> Self {
		self.decompressor = Some(decompressor);
		self
	}

	/// Returns the configured disk cache.
	pub fn cache(&self) -> Option<DecompressionCache> {
		self.cache_dir.as_ref().map(|dir| DecompressionCache::new(dir.clone()))
	}

	/// Returns the configured decompressor.
	pub fn decompressor(&self) -> Option<&dyn Decompressor> {
		self.decompressor.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = ImportConfig::default();
		assert!(config.cache_dir.is_none());
		assert!(config.decompressor().is_some());

		let config = ImportConfig::without_decompressor().with_cache_dir("c");
		assert_eq!(config.cache().unwrap().dir(), Path::new("c"));
		assert!(config.decompressor().is_none());
	}
}
