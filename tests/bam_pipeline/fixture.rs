//! In-test container writer

use std::io::Write;
use std::path::{Path, PathBuf};

use bam_rs::bam_types::file::bam::constants::{COMPRESSED_SIGNATURE, HEADER_SIZE};
use bam_rs::prelude::*;
use flate2::{Compression, write::ZlibEncoder};

pub(crate) const KEY: u8 = 0;

pub(crate) fn encode_rle(pixels: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	let mut i = 0;
	while i < pixels.len() {
		if pixels[i] == KEY {
			let mut run = 1;
			while i + run < pixels.len() && pixels[i + run] == KEY && run < 256 {
				run += 1;
			}
			out.extend_from_slice(&[KEY, (run - 1) as u8]);
			i += run;
		} else {
			out.push(pixels[i]);
			i += 1;
		}
	}
	out
}

/// Builds a plain container with `frames` solid frames of `w × h`, frame `n`
/// filled with `n + 1` and anchored at (`n`, `h`).
pub(crate) fn container(frames: u8, w: u16, h: u16, cycles: &[(u16, u16)], lookup: &[u16]) -> Vec<u8> {
	let frames_offset = HEADER_SIZE;
	let palette_offset = frames_offset + frames as usize * FrameEntry::SIZE + cycles.len() * CycleEntry::SIZE;
	let lookup_offset = palette_offset + Palette::BYTE_SIZE;
	let mut data_offset = lookup_offset + lookup.len() * 2;

	let header = BamHeader::new(
		frames as u16,
		cycles.len() as u8,
		KEY,
		frames_offset as u32,
		palette_offset as u32,
		lookup_offset as u32,
	);
	let mut out = header.to_bytes().to_vec();

	let data: Vec<Vec<u8>> =
		(0..frames).map(|n| encode_rle(&vec![n + 1; w as usize * h as usize])).collect();
	for (n, pixels) in data.iter().enumerate() {
		let entry = FrameEntry::new(w, h, n as i16, h as i16, data_offset as u32, true);
		out.extend_from_slice(&entry.to_bytes());
		data_offset += pixels.len();
	}
	for &(count, first) in cycles {
		out.extend_from_slice(&CycleEntry::new(count, first).to_bytes());
	}
	out.extend_from_slice(&Palette::grayscale().to_bytes());
	for entry in lookup {
		out.extend_from_slice(&entry.to_le_bytes());
	}
	for pixels in &data {
		out.extend_from_slice(pixels);
	}
	out
}

/// Wraps a plain container in the zlib envelope.
pub(crate) fn wrap(plain: &[u8]) -> Vec<u8> {
	let mut out = COMPRESSED_SIGNATURE.to_vec();
	out.extend_from_slice(&(plain.len() as u32).to_le_bytes());
	let mut encoder = ZlibEncoder::new(out, Compression::best());
	encoder.write_all(plain).unwrap();
	encoder.finish().unwrap()
}

/// Writes `data` to `dir/name` and returns the path.
pub(crate) fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, data).unwrap();
	path
}
