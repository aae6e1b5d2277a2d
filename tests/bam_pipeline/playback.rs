//! Asset building and playback through the public facade

use std::io::Cursor;
use std::sync::Arc;

use bam_rs::prelude::*;

use crate::fixture::container;

fn factory(frames: u8, cycles: &[(u16, u16)], lookup: &[u16]) -> AnimationFactory {
	let data = container(frames, 4, 4, cycles, lookup);
	let mut bam = BamFile::from_reader(Cursor::new(data), &ImportConfig::default()).unwrap();
	bam.animation_factory(&SoftwareRenderer, "TEST").unwrap()
}

fn shown(frame: Option<&Arc<Sprite>>) -> u8 {
	frame.map(|f| f.pixels()[0]).unwrap_or(0)
}

#[test]
fn test_one_second_three_frames() {
	let factory = factory(3, &[(3, 0)], &[0, 1, 2]);
	let mut walk = factory.animation(0).unwrap();
	let clock = ManualClock::new(0);

	assert_eq!(shown(walk.next_frame(&clock)), 1);
	clock.advance(1000);
	assert_eq!(shown(walk.next_frame(&clock)), 1);
	assert_eq!(walk.position(), 0);
	assert_eq!(walk.state(), PlaybackState::Running);
}

#[test]
fn test_play_once_through_factory() {
	let factory = factory(5, &[(5, 0)], &[4, 3, 2, 1, 0]);
	let mut death = factory.animation(0).unwrap();
	death.set_play_once(true);
	let clock = ManualClock::new(0);

	let mut seen = Vec::new();
	for _ in 0..20 {
		seen.push(shown(death.next_frame(&clock)));
		clock.advance(67);
	}

	// each fetch shows the frame held before its own advance
	assert_eq!(&seen[..6], &[5, 5, 4, 3, 2, 1]);
	assert!(seen[6..].iter().all(|&f| f == 1));
	assert_eq!(death.state(), PlaybackState::Completed);
}

#[test]
fn test_instances_share_asset_frames() {
	let factory = factory(2, &[(2, 0), (2, 2)], &[0, 1, 1, 0]);
	let east = factory.animation(0).unwrap();
	let mut west = factory.animation(1).unwrap();

	assert!(Arc::ptr_eq(east.frame(0).unwrap(), west.frame(1).unwrap()));
	assert_eq!(east.ownership(), FrameOwnership::Shared);

	west.mirror(&SoftwareRenderer);
	assert_eq!(west.ownership(), FrameOwnership::Exclusive);
	assert!(!Arc::ptr_eq(east.frame(0).unwrap(), west.frame(1).unwrap()));
	assert_eq!(east.frame(0).unwrap().x(), 0);
	assert_eq!(west.frame(1).unwrap().x(), 4);
}

#[test]
fn test_local_palette_does_not_leak() {
	let factory = factory(1, &[(1, 0)], &[0]);
	let mut tinted = factory.animation(0).unwrap();
	let plain = factory.animation(0).unwrap();

	let mut colors = Palette::grayscale();
	colors.set(1, Color::rgb(255, 0, 0));
	tinted.set_palette(Some(&colors), PaletteMode::Local);

	let frame = tinted.frame(0).unwrap();
	assert_eq!(tinted.effective_palette(frame).get(1), Color::rgb(255, 0, 0));
	let frame = plain.frame(0).unwrap();
	assert_eq!(plain.effective_palette(frame).get(1), Color::gray(1));
}

#[test]
fn test_font_through_facade() {
	let data = container(3, 5, 7, &[(3, 0)], &[0, 1, 2]);
	let mut bam = BamFile::from_reader(Cursor::new(data), &ImportConfig::default()).unwrap();
	let font = bam.font().unwrap();

	assert_eq!(font.len(), 3);
	assert_eq!(font.total_width(), 15);
	assert_eq!(font.max_height(), 7);
}
