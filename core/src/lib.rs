//! Binary FSK audio modem
//!
//! Turns text into a 44.1 kHz mono WAV of 1000/2000 Hz tones (one tone per
//! bit, 20 ms each) and recovers text from such a recording, optionally
//! through a simulated Gaussian noise channel.

pub mod bits;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fsk;
pub mod noise;
pub mod resample;
pub mod sync;
pub mod wav;

pub use bits::{bits_to_text, text_to_bits, PREAMBLE};
pub use config::ModemConfig;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{ModemError, Result};
pub use fsk::{FskDemodulator, FskModulator};
pub use noise::{apply_noise, seeded_rng, validate_noise_level};
pub use sync::synchronize;
pub use wav::{read_wav, write_wav, PcmAudio};

// Default profile
pub const SAMPLE_RATE: u32 = 44_100;
pub const BIT_DURATION_SECS: f64 = 0.02;
pub const SAMPLES_PER_BIT: usize = 882; // SAMPLE_RATE * BIT_DURATION_SECS
pub const AMPLITUDE: f64 = 16_000.0;
pub const FREQ_ZERO: f64 = 1000.0; // Hz
pub const FREQ_ONE: f64 = 2000.0; // Hz

/// Noise level injected by `decode(.., add_noise = true)`, independent of
/// whatever level the audio was encoded with
pub const DECODE_NOISE_LEVEL: f32 = 0.1;

/// Encode text with the default profile.
pub fn encode(text: &str, noise_level: f32) -> Result<Vec<u8>> {
    Encoder::new()?.encode(text, noise_level)
}

/// Decode WAV bytes with the default profile.
pub fn decode(bytes: &[u8], add_noise: bool) -> Result<String> {
    Decoder::new()?.decode(bytes, add_noise)
}
