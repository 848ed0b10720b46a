use crate::bits::{text_to_bits, PREAMBLE};
use crate::config::ModemConfig;
use crate::error::Result;
use crate::fsk::FskModulator;
use crate::noise::{apply_noise, validate_noise_level};
use crate::wav::write_wav;
use rand::Rng;

/// Encoder using binary FSK
///
/// Produces preamble + payload tones, optionally buried in Gaussian noise,
/// wrapped in a mono 16-bit WAV container.
pub struct Encoder {
    fsk: FskModulator,
}

impl Encoder {
    pub fn new() -> Result<Self> {
        Self::with_config(ModemConfig::default())
    }

    pub fn with_config(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fsk: FskModulator::new(config),
        })
    }

    pub fn config(&self) -> &ModemConfig {
        self.fsk.config()
    }

    /// Encode text into PCM samples: preamble bits, then 8 bits per character.
    ///
    /// `noise_level` must lie in [0, 1]; 0 disables the noise model.
    pub fn encode_samples<R: Rng + ?Sized>(
        &self,
        text: &str,
        noise_level: f32,
        rng: &mut R,
    ) -> Result<Vec<i16>> {
        let noise_level = validate_noise_level(noise_level)?;

        let mut bits = PREAMBLE.to_vec();
        bits.extend(text_to_bits(text)?);

        let samples = self.fsk.modulate(&bits);
        log::debug!(
            "Modulated {} bits ({} payload chars) into {} samples",
            bits.len(),
            text.chars().count(),
            samples.len()
        );

        Ok(apply_noise(&samples, noise_level, self.config().amplitude, rng))
    }

    /// Encode text into WAV bytes, drawing noise from `rng`.
    pub fn encode_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        noise_level: f32,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let samples = self.encode_samples(text, noise_level, rng)?;
        write_wav(&samples, self.config().sample_rate)
    }

    /// Encode text into WAV bytes using the thread-local generator for noise.
    pub fn encode(&self, text: &str, noise_level: f32) -> Result<Vec<u8>> {
        self.encode_with_rng(text, noise_level, &mut rand::thread_rng())
    }
}
