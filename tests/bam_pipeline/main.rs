//! End-to-end tests for container loading, caching and playback

mod cache;
mod fixture;
mod playback;
