//! Decompression cache behaviour across loads

use std::fs;
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bam_rs::prelude::*;

use crate::fixture::{container, wrap, write};

#[derive(Debug, Default)]
struct CountingDecompressor {
	calls: AtomicUsize,
}

impl Decompressor for CountingDecompressor {
	fn decompress(&self, input: &mut dyn Read, output: &mut dyn Write) -> io::Result<u64> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		ZlibDecompressor.decompress(input, output)
	}
}

fn all_pixels<R: Read + io::Seek>(bam: &mut BamFile<R>) -> Vec<Vec<u8>> {
	(0..bam.frame_count()).map(|i| bam.frame_pixels(i).unwrap()).collect()
}

#[test_log::test]
fn test_compressed_load_decompresses_once() {
	let dir = tempfile::tempdir().unwrap();
	let cache_dir = dir.path().join("cache");
	let plain = container(4, 3, 3, &[(4, 0)], &[0, 1, 2, 3]);
	let path = write(dir.path(), "WALK.BAM", &wrap(&plain));

	let counting = Arc::new(CountingDecompressor::default());
	let config = ImportConfig::new(&cache_dir).with_decompressor(counting.clone());

	let mut first = BamFile::open(&path, &config).unwrap();
	let mut second = BamFile::open(&path, &config).unwrap();

	assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
	assert!(first.source().is_cached());
	assert!(second.source().is_cached());
	assert_eq!(all_pixels(&mut first), all_pixels(&mut second));
	assert_eq!(fs::read(cache_dir.join("WALK.BAM")).unwrap(), plain);
}

#[test_log::test]
fn test_cached_entry_loads_without_decompressor() {
	let dir = tempfile::tempdir().unwrap();
	let plain = container(2, 2, 2, &[(2, 0)], &[1, 0]);
	let path = write(dir.path(), "IDLE.BAM", &wrap(&plain));

	BamFile::open(&path, &ImportConfig::new(dir.path().join("cache"))).unwrap();

	let config = ImportConfig::without_decompressor().with_cache_dir(dir.path().join("cache"));
	let mut bam = BamFile::open(&path, &config).unwrap();
	assert_eq!(bam.frame_pixels(1).unwrap(), vec![2; 4]);
}

#[test_log::test]
fn test_missing_decompressor_leaves_cache_empty() {
	let dir = tempfile::tempdir().unwrap();
	let cache_dir = dir.path().join("cache");
	let path = write(dir.path(), "CAST.BAM", &wrap(&container(1, 1, 1, &[], &[])));

	let config = ImportConfig::without_decompressor().with_cache_dir(&cache_dir);
	let result = BamFile::open(&path, &config);

	assert!(matches!(result, Err(BamError::DecompressorUnavailable)));
	assert!(!cache_dir.join("CAST.BAM").exists());
}

#[test_log::test]
fn test_concurrent_first_loads() {
	let dir = tempfile::tempdir().unwrap();
	let cache_dir = dir.path().join("cache");
	let plain = container(6, 8, 8, &[(6, 0)], &[0, 1, 2, 3, 4, 5]);
	let path = write(dir.path(), "RACE.BAM", &wrap(&plain));
	let config = ImportConfig::new(&cache_dir);

	std::thread::scope(|scope| {
		let handles: Vec<_> = (0..4)
			.map(|_| {
				scope.spawn(|| {
					let mut bam = BamFile::open(&path, &config).unwrap();
					all_pixels(&mut bam)
				})
			})
			.collect();
		let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
		assert!(results.windows(2).all(|w| w[0] == w[1]));
	});

	assert_eq!(fs::read(cache_dir.join("RACE.BAM")).unwrap(), plain);
	let leftovers = fs::read_dir(&cache_dir).unwrap().count();
	assert_eq!(leftovers, 1);
}

#[test]
fn test_plain_container_bypasses_cache() {
	let dir = tempfile::tempdir().unwrap();
	let cache_dir = dir.path().join("cache");
	let path = write(dir.path(), "PLAIN.BAM", &container(1, 2, 2, &[(1, 0)], &[0]));

	let bam = BamFile::open(&path, &ImportConfig::new(&cache_dir)).unwrap();
	assert!(!bam.source().is_cached());
	assert!(!cache_dir.exists());
}
