//! Realtime Voice Demo Application
//!
//! Performs the startup wiring: reads connection settings from the
//! environment, selects an authenticated conversation client, and opens
//! speaker output. Plays a short confirmation tone so the audio path is
//! audibly verified, then waits for ctrl-c.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use realtime_voice_demo::{
    audio::SpeakerOutput,
    client::{select_client, ClientConfig},
    constants::OUTPUT_SAMPLE_RATE,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Realtime Voice Demo");

    // Configure the conversation client, exactly once
    let config = ClientConfig::from_env();
    let client = select_client(&config).context("failed to configure conversation client")?;

    tracing::info!(
        "Conversation client ready: {:?} at {}",
        client.mode(),
        client.endpoint()
    );

    // Open the speaker; playback of whatever is enqueued starts now
    let mut speaker = SpeakerOutput::new().context("failed to open speaker output")?;

    // Short confirmation tone through the same path remote audio takes
    speaker.enqueue(confirmation_tone(440.0, Duration::from_millis(400)));

    tracing::info!("Speaker output running, press ctrl-c to exit");
    tokio::signal::ctrl_c().await?;

    if let Some(e) = speaker.check_errors() {
        tracing::warn!("Stream reported error during session: {}", e);
    }

    speaker.close();
    Ok(())
}

/// Synthesize a sine tone as little-endian i16 mono PCM at the output rate
fn confirmation_tone(freq_hz: f32, duration: Duration) -> Bytes {
    let total_samples = (OUTPUT_SAMPLE_RATE as f32 * duration.as_secs_f32()) as usize;
    let mut pcm = Vec::with_capacity(total_samples * 2);

    for i in 0..total_samples {
        let t = i as f32 / OUTPUT_SAMPLE_RATE as f32;
        let amplitude = (t * freq_hz * 2.0 * std::f32::consts::PI).sin() * 0.2;
        let sample = (amplitude * i16::MAX as f32) as i16;
        pcm.extend_from_slice(&sample.to_le_bytes());
    }

    Bytes::from(pcm)
}
