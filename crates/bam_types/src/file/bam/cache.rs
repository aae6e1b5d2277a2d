//! Disk cache for zlib wrapped containers.
//!
//! A wrapped container is expanded once into the cache directory, named after
//! the file-name component of its identity. Later loads of the same identity
//! open the cached plain container and never touch the decompressor again.
//!
//! Population writes into a temporary file inside the cache directory and
//! renames it into place, so a half-written entry is never visible under the
//! final name. When two loaders race, the last rename wins and both files
//! carry identical content.

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::file::BamError;

/// Block-decompression capability used for wrapped containers.
pub trait Decompressor: Send + Sync + fmt::Debug {
	/// Expands all of `input` into `output`, returning the number of bytes written.
	fn decompress(&self, input: &mut dyn Read, output: &mut dyn Write) -> io::Result<u64>;
}

/// Zlib stream decompressor backed by `flate2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZlibDecompressor;

impl Decompressor for ZlibDecompressor {
	fn decompress(&self, input: &mut dyn Read, output: &mut dyn Write) -> io::Result<u64> {
		let mut decoder = ZlibDecoder::new(input);
		io::copy(&mut decoder, output)
	}
}

/// Directory of decompressed containers keyed by source identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecompressionCache {
	dir: PathBuf,
}

impl DecompressionCache {
	/// Creates a cache rooted at `dir`. The directory is created on first use.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
		}
	}

	/// Returns the cache directory.
	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Returns the path of the cache entry for `identity`.
	pub fn entry_path(&self, identity: &Path) -> Result<PathBuf, BamError> {
		let name = identity
			.file_name()
			.ok_or_else(|| BamError::InvalidCacheIdentity(identity.display().to_string()))?;
		Ok(self.dir.join(name))
	}

	/// Returns `true` when an entry for `identity` exists.
	pub fn contains(&self, identity: &Path) -> bool {
		self.entry_path(identity).map(|path| path.is_file()).unwrap_or(false)
	}

	/// Opens the cached entry for `identity`, if present.
	pub fn lookup(&self, identity: &Path) -> Result<Option<fs::File>, BamError> {
		let path = self.entry_path(identity)?;
		match fs::File::open(&path) {
			Ok(file) => {
				debug!("cache hit for {} at {}", identity.display(), path.display());
				Ok(Some(file))
			}
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e.into()),
		}
	}

	/// Expands `input` into a new entry for `identity` and opens it.
	///
	/// `input` must be positioned at the start of the compressed stream.
	pub fn populate(
		&self,
		identity: &Path,
		input: &mut dyn Read,
		decompressor: &dyn Decompressor,
	) -> Result<fs::File, BamError> {
		let path = self.entry_path(identity)?;
		debug!("cache miss for {}, decompressing into {}", identity.display(), path.display());

		fs::create_dir_all(&self.dir)?;
		let mut temp = NamedTempFile::new_in(&self.dir)?;
		{
			let mut writer = BufWriter::new(temp.as_file_mut());
			let written = decompressor.decompress(input, &mut writer)?;
			writer.flush()?;
			debug!("decompressed {} bytes for {}", written, identity.display());
		}

		if let Err(e) = temp.persist(&path) {
			// Another loader may have moved its copy into place first.
			if !path.is_file() {
				return Err(e.error.into());
			}
			warn!("reusing concurrently populated cache entry {}: {}", path.display(), e.error);
		}

		Ok(fs::File::open(&path)?)
	}

	/// Opens the entry for `identity`, populating it from `input` on a miss.
	///
	/// `decompressor` is only consulted on a miss. `None` models an unavailable
	/// capability and fails the load without creating any entry.
	pub fn open_or_populate<R: Read>(
		&self,
		identity: &Path,
		input: &mut R,
		decompressor: Option<&dyn Decompressor>,
	) -> Result<fs::File, BamError> {
		if let Some(file) = self.lookup(identity)? {
			return Ok(file);
		}
		let decompressor = decompressor.ok_or(BamError::DecompressorUnavailable)?;
		self.populate(identity, input, decompressor)
	}

	/// Removes the entry for `identity`. Missing entries are not an error.
	pub fn evict(&self, identity: &Path) -> Result<(), BamError> {
		let path = self.entry_path(identity)?;
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}
}
