//! Animation assets and playback.

mod animation;
mod clock;
mod factory;

pub use animation::{Animation, FrameOwnership, PaletteMode, PlaybackState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use factory::AnimationFactory;
