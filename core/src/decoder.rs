use crate::bits::{bits_to_text, PREAMBLE};
use crate::config::ModemConfig;
use crate::error::Result;
use crate::fsk::FskDemodulator;
use crate::noise::apply_noise;
use crate::resample::resample_pcm;
use crate::sync::synchronize;
use crate::wav::read_wav;
use crate::DECODE_NOISE_LEVEL;
use rand::Rng;

/// Decoder using binary FSK
///
/// Demodulates every full bit frame, aligns on the preamble and maps the
/// remaining bits back to text. Decoding never fails on signal content:
/// a missing preamble or a noisy channel only garbles the output.
pub struct Decoder {
    fsk: FskDemodulator,
}

impl Decoder {
    pub fn new() -> Result<Self> {
        Self::with_config(ModemConfig::default())
    }

    pub fn with_config(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fsk: FskDemodulator::new(config),
        })
    }

    pub fn config(&self) -> &ModemConfig {
        self.fsk.config()
    }

    /// Decode PCM samples already at the profile sample rate.
    ///
    /// With `add_noise` the samples first pass through the noise model at
    /// the fixed [`DECODE_NOISE_LEVEL`]. Trailing NUL characters (what
    /// trailing silence demodulates to) are dropped from the result.
    pub fn decode_samples<R: Rng + ?Sized>(
        &mut self,
        samples: &[i16],
        add_noise: bool,
        rng: &mut R,
    ) -> String {
        let noisy;
        let samples = if add_noise {
            noisy = apply_noise(samples, DECODE_NOISE_LEVEL, self.config().amplitude, rng);
            &noisy[..]
        } else {
            samples
        };

        let raw_bits = self.fsk.demodulate(samples);
        let payload = synchronize(&raw_bits, &PREAMBLE);
        log::debug!(
            "Demodulated {} bits, {} after synchronization",
            raw_bits.len(),
            payload.len()
        );

        let text = bits_to_text(payload);
        text.trim_end_matches('\0').to_string()
    }

    /// Decode WAV bytes, drawing optional noise from `rng`.
    ///
    /// Containers at another sample rate are resampled to the profile rate
    /// before demodulation.
    pub fn decode_with_rng<R: Rng + ?Sized>(
        &mut self,
        bytes: &[u8],
        add_noise: bool,
        rng: &mut R,
    ) -> Result<String> {
        let audio = read_wav(bytes)?;
        let target_rate = self.config().sample_rate;

        let samples = if audio.sample_rate != target_rate {
            log::warn!(
                "Resampling container from {} Hz to {} Hz",
                audio.sample_rate,
                target_rate
            );
            resample_pcm(&audio.samples, audio.sample_rate, target_rate)
        } else {
            audio.samples
        };

        Ok(self.decode_samples(&samples, add_noise, rng))
    }

    /// Decode WAV bytes using the thread-local generator for optional noise.
    pub fn decode(&mut self, bytes: &[u8], add_noise: bool) -> Result<String> {
        self.decode_with_rng(bytes, add_noise, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use crate::error::ModemError;
    use crate::noise::seeded_rng;
    use crate::wav::write_wav;

    #[test]
    fn test_decoder_round_trip() {
        let encoder = Encoder::new().unwrap();
        let mut decoder = Decoder::new().unwrap();
        let bytes = encoder.encode("Hi", 0.0).unwrap();
        assert_eq!(decoder.decode(&bytes, false).unwrap(), "Hi");
    }

    #[test]
    fn test_decoder_silence_yields_empty_text() {
        let mut decoder = Decoder::new().unwrap();
        let bytes = write_wav(&vec![0i16; 882 * 20], 44_100).unwrap();
        assert_eq!(decoder.decode(&bytes, false).unwrap(), "");
    }

    #[test]
    fn test_decoder_shorter_than_one_frame() {
        let mut decoder = Decoder::new().unwrap();
        let bytes = write_wav(&[0i16; 100], 44_100).unwrap();
        assert_eq!(decoder.decode(&bytes, false).unwrap(), "");
    }

    #[test]
    fn test_decoder_skips_leading_silence() {
        let encoder = Encoder::new().unwrap();
        let mut decoder = Decoder::new().unwrap();
        let mut samples = vec![0i16; 882 * 5];
        samples.extend(encoder.encode_samples("sync", 0.0, &mut seeded_rng(0)).unwrap());
        samples.extend(vec![0i16; 882 * 16]);
        assert_eq!(decoder.decode_samples(&samples, false, &mut seeded_rng(0)), "sync");
    }

    #[test]
    fn test_decoder_with_injected_noise() {
        let encoder = Encoder::new().unwrap();
        let mut decoder = Decoder::new().unwrap();
        let bytes = encoder.encode("noise tolerant", 0.0).unwrap();
        let text = decoder.decode_with_rng(&bytes, true, &mut seeded_rng(5)).unwrap();
        assert_eq!(text, "noise tolerant");
    }

    #[test]
    fn test_decoder_rejects_malformed_container() {
        let mut decoder = Decoder::new().unwrap();
        assert!(matches!(
            decoder.decode(b"RIFF\x10\x00\x00\x00WAVE", false),
            Err(ModemError::ContainerFormat(_))
        ));
    }

    #[test]
    fn test_decoder_resamples_other_rates() {
        let config_48k = ModemConfig::default().with_sample_rate(48_000);
        let encoder = Encoder::with_config(config_48k).unwrap();
        let bytes = encoder.encode("rate", 0.0).unwrap();

        let mut decoder = Decoder::new().unwrap();
        assert_eq!(decoder.decode(&bytes, false).unwrap(), "rate");
    }

    #[test]
    fn test_decoder_rejects_implausible_sample_rate() {
        // 1 Hz would resample 1000 samples into 44.1 million
        let bytes = write_wav(&vec![0i16; 1000], 1).unwrap();
        let mut decoder = Decoder::new().unwrap();
        assert!(matches!(
            decoder.decode(&bytes, false),
            Err(ModemError::ContainerFormat(_))
        ));
    }
}
