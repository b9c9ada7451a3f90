//! Audio subsystem module

pub mod buffer;
pub mod device;
pub mod playback;

pub use buffer::{PcmRing, PlaybackQueue};
pub use device::{get_default_output_device, AudioDevice};
pub use playback::SpeakerOutput;
