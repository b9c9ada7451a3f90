//! # Realtime Voice Demo
//!
//! Minimal demo wiring a hosted realtime conversation API client to
//! local speaker playback.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      HOSTING PROCESS                         │
//! │                                                              │
//! │  env vars ──▶ ClientConfig ──▶ select_client                 │
//! │                                     │                        │
//! │                                     ▼                        │
//! │                         RealtimeClientHandle                 │
//! │                    (AzureFederated / AzureApiKey /           │
//! │                         DefaultHosted)                       │
//! │                                                              │
//! │  remote API audio ──▶ SpeakerOutput (audio::playback)        │
//! │                           │                                  │
//! │                           ▼                                  │
//! │                  PcmRing (audio::buffer)                     │
//! │                           │                                  │
//! │                           ▼  cpal callback thread            │
//! │                 default output device, 24 kHz i16 mono       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod audio;
pub mod client;
pub mod error;

pub use error::{Error, Result};

/// Application-wide constants
pub mod constants {
    /// Sample rate of audio produced by the remote conversation API
    pub const OUTPUT_SAMPLE_RATE: u32 = 24_000;

    /// Channel count of remote audio (mono)
    pub const OUTPUT_CHANNELS: u16 = 1;

    /// Bytes per sample (16-bit signed little-endian PCM)
    pub const BYTES_PER_SAMPLE: usize = 2;

    /// Maximum buffered playback duration in seconds
    pub const PLAYBACK_BUFFER_SECS: usize = 120;

    /// Playback ring capacity in bytes (2 minutes of 24 kHz mono i16)
    pub const PLAYBACK_BUFFER_BYTES: usize = OUTPUT_SAMPLE_RATE as usize
        * OUTPUT_CHANNELS as usize
        * BYTES_PER_SAMPLE
        * PLAYBACK_BUFFER_SECS;

    /// Default hosted API endpoint used when no Azure endpoint is configured
    pub const DEFAULT_HOSTED_ENDPOINT: &str = "https://api.openai.com/v1";

    /// Model requested against the default hosted endpoint
    pub const DEFAULT_REALTIME_MODEL: &str = "gpt-4o-realtime-preview-2024-10-01";

    /// Secret prefix length kept visible when masking for diagnostics
    pub const SECRET_MASK_PREFIX: usize = 5;
}
