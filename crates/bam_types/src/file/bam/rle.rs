//! RLE8 pixel codec.
//!
//! ## Encoding
//!
//! Frame pixels are palette indices. Only runs of the container's color key
//! are compressed, every other byte is a literal:
//!
//! | Input              | Output                          |
//! |--------------------|---------------------------------|
//! | `b` (`b != key`)   | one pixel `b`                   |
//! | `key`, `n`         | `n + 1` pixels of `key`         |
//!
//! ## Size estimation
//!
//! The compressed size of a frame is not stored anywhere. Readers fetch
//! [`estimated_size`] bytes (`ceil(w * h * 1.5)`), clamped to whatever is left
//! in the stream, and let the decoder stop once `w * h` pixels are produced.
//!
//! ## Damaged frames
//!
//! Frames in the wild occasionally carry a final run that overshoots the
//! frame. The run is clamped to the remaining pixels and decoding stops. When
//! the input runs dry first, the unwritten tail keeps the color key. Neither
//! case is an error, the [`DecodeStatus`] reports which one happened.

/// How a decode finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStatus {
	/// All pixels produced without clamping
	Complete,

	/// A run overshot the frame and was truncated
	RunClamped,

	/// The input ended before the frame was complete
	InputExhausted,
}

impl DecodeStatus {
	/// Returns `true` for frames that needed recovery.
	pub fn is_damaged(&self) -> bool {
		!matches!(self, Self::Complete)
	}
}

/// Result of decoding a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
	/// Exactly `width * height` palette indices
	pub pixels: Vec<u8>,

	/// Number of input bytes read
	pub consumed: usize,

	/// Completion status
	pub status: DecodeStatus,
}

/// Upper bound of the compressed size of a `width × height` frame.
#[inline]
pub fn estimated_size(width: u16, height: u16) -> usize {
	(width as usize * height as usize * 3).div_ceil(2)
}

/// Decodes `input` into `output`, filling it completely.
///
/// Never reads past `input` and never writes past `output`. Returns the
/// number of input bytes consumed together with the completion status.
pub fn decode_into(input: &[u8], output: &mut [u8], key: u8) -> (usize, DecodeStatus) {
	let total = output.len();
	let mut src = 0;
	let mut dst = 0;

	while dst < total {
		let Some(&byte) = input.get(src) else {
			output[dst..].fill(key);
			return (src, DecodeStatus::InputExhausted);
		};

		if byte != key {
			output[dst] = byte;
			dst += 1;
			src += 1;
			continue;
		}

		let Some(&run) = input.get(src + 1) else {
			output[dst..].fill(key);
			return (input.len(), DecodeStatus::InputExhausted);
		};
		src += 2;

		let count = run as usize + 1;
		let left = total - dst;
		if count > left {
			output[dst..].fill(key);
			return (src, DecodeStatus::RunClamped);
		}
		output[dst..dst + count].fill(key);
		dst += count;
	}

	(src, DecodeStatus::Complete)
}

/// Decodes `pixel_count` pixels from `input`.
pub fn decode(input: &[u8], pixel_count: usize, key: u8) -> Decoded {
	let mut pixels = vec![key; pixel_count];
	let (consumed, status) = decode_into(input, &mut pixels, key);
	Decoded {
		pixels,
		consumed,
		status,
	}
}
