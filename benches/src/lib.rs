//! Benchmark helper utilities for bam-rs
//!
//! This module provides utilities for generating synthetic containers and
//! frame data for the benchmark suite. No game assets are needed.

/// Palette index used as color key in generated data
pub const COLOR_KEY: u8 = 0;

/// Generates `width × height` palette indices resembling sprite art
///
/// Each row has transparent margins around an opaque body, so RLE runs and
/// literals are mixed the way character sprites mix them.
pub fn generate_frame_pixels(width: u16, height: u16, seed: u8) -> Vec<u8> {
	let (w, h) = (width as usize, height as usize);
	let mut pixels = Vec::with_capacity(w * h);

	for y in 0..h {
		let margin = (y * 7 + seed as usize) % (w / 3 + 1);
		for x in 0..w {
			if x < margin || x + margin >= w {
				pixels.push(COLOR_KEY);
			} else {
				// never produce the key inside the body
				pixels.push(((x + y + seed as usize) % 255) as u8 + 1);
			}
		}
	}

	pixels
}

/// Encodes pixels with the container's RLE8 scheme
pub fn encode_rle(pixels: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(pixels.len());
	let mut i = 0;

	while i < pixels.len() {
		if pixels[i] == COLOR_KEY {
			let mut run = 1;
			while i + run < pixels.len() && pixels[i + run] == COLOR_KEY && run < 256 {
				run += 1;
			}
			out.push(COLOR_KEY);
			out.push((run - 1) as u8);
			i += run;
		} else {
			out.push(pixels[i]);
			i += 1;
		}
	}

	out
}

/// Generates a plain container for benchmarking
///
/// `frames` distinct frames of `width × height` are split into `cycles`
/// cycles of `slots` slots each. Slots cycle through the frames, so every
/// frame is referenced by several cycles and deduplication has work to do.
pub fn generate_test_bam_data(frames: u16, width: u16, height: u16, cycles: u8, slots: u16) -> Vec<u8> {
	let header_size = 24usize;
	let lookup_len = cycles as usize * slots as usize;
	let frames_offset = header_size;
	let palette_offset = frames_offset + frames as usize * 12 + cycles as usize * 4;
	let lookup_offset = palette_offset + 1024;
	let mut data_offset = lookup_offset + lookup_len * 2;

	let mut data = Vec::new();

	// Header
	data.extend_from_slice(b"BAM V1  ");
	data.extend_from_slice(&frames.to_le_bytes());
	data.push(cycles);
	data.push(COLOR_KEY);
	data.extend_from_slice(&(frames_offset as u32).to_le_bytes());
	data.extend_from_slice(&(palette_offset as u32).to_le_bytes());
	data.extend_from_slice(&(lookup_offset as u32).to_le_bytes());

	// Frame table
	let encoded: Vec<Vec<u8>> = (0..frames)
		.map(|n| encode_rle(&generate_frame_pixels(width, height, n as u8)))
		.collect();
	for pixels in &encoded {
		data.extend_from_slice(&width.to_le_bytes());
		data.extend_from_slice(&height.to_le_bytes());
		data.extend_from_slice(&((width / 2) as i16).to_le_bytes());
		data.extend_from_slice(&(height as i16).to_le_bytes());
		data.extend_from_slice(&(data_offset as u32).to_le_bytes());
		data_offset += pixels.len();
	}

	// Cycle table
	for c in 0..cycles as u16 {
		data.extend_from_slice(&slots.to_le_bytes());
		data.extend_from_slice(&(c * slots).to_le_bytes());
	}

	// Palette (256 colors, BGRA format)
	for i in 0..=255u8 {
		data.extend_from_slice(&[i.wrapping_mul(3), i.wrapping_mul(2), i, 0x00]);
	}

	// Frame lookup table
	for slot in 0..lookup_len {
		let frame = if frames == 0 {
			0
		} else {
			(slot % frames as usize) as u16
		};
		data.extend_from_slice(&frame.to_le_bytes());
	}

	// Pixel data
	for pixels in &encoded {
		data.extend_from_slice(pixels);
	}

	data
}

/// Common benchmark sizes for synthetic frames
pub mod sizes {
	/// Inventory icon: 32x32 (1,024 pixels)
	pub const ICON: (u16, u16) = (32, 32);
	/// Character frame: 96x96 (9,216 pixels)
	pub const CHARACTER: (u16, u16) = (96, 96);
	/// Large creature frame: 256x192 (49,152 pixels)
	pub const CREATURE: (u16, u16) = (256, 192);
	/// Full-screen frame: 640x480 (307,200 pixels)
	pub const SCREEN: (u16, u16) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_bam_data() {
		let data = generate_test_bam_data(4, 16, 8, 3, 5);

		// Check signature
		assert_eq!(&data[0..8], b"BAM V1  ");

		// Check counts
		assert_eq!(u16::from_le_bytes([data[8], data[9]]), 4);
		assert_eq!(data[10], 3);

		// Check minimum size (header + tables + palette + lookup)
		assert!(data.len() >= 24 + 4 * 12 + 3 * 4 + 1024 + 15 * 2);
	}

	#[test]
	fn test_frame_pixels_body_never_keyed() {
		let pixels = generate_frame_pixels(20, 4, 3);
		assert_eq!(pixels.len(), 80);
		assert!(pixels.iter().any(|&p| p == COLOR_KEY));
		assert!(pixels.iter().any(|&p| p != COLOR_KEY));
	}

	#[test]
	fn test_encode_rle_shrinks_margins() {
		let pixels = vec![COLOR_KEY; 300];
		assert_eq!(encode_rle(&pixels), vec![COLOR_KEY, 255, COLOR_KEY, 43]);
	}
}
