use crate::config::ModemConfig;
use crate::error::{ModemError, Result};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

// Binary FSK over a single audio channel
//
// Each bit occupies one fixed-length frame (882 samples at 44.1 kHz):
// - bit 0 -> pure tone at `freq_zero` (1000 Hz)
// - bit 1 -> pure tone at `freq_one` (2000 Hz)
//
// Every frame restarts its sine at phase zero, so adjacent frames meet with
// a phase discontinuity. The demodulator looks at each frame in isolation
// and does not care.
//
// With the default profile both tones fall exactly on FFT bins
// (44100 / 882 = 50 Hz per bin -> bins 20 and 40).

/// Hann window `0.5 - 0.5 cos(2 pi n / (N - 1))`.
/// A single-sample window is left unweighted.
pub fn hann_window(len: usize) -> Vec<f64> {
    if len <= 1 {
        return vec![1.0; len];
    }
    let denom = (len - 1) as f64;
    (0..len)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f64 / denom).cos())
        .collect()
}

/// FSK modulator - turns a bitstream into 16-bit PCM tones
pub struct FskModulator {
    config: ModemConfig,
}

impl FskModulator {
    pub fn new(config: ModemConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Generate `round(sample_rate * duration)` samples of a pure sine at
    /// `frequency`, starting at phase zero.
    ///
    /// Values are truncated toward zero into the i16 range.
    pub fn synthesize_tone(&self, frequency: f64, duration: f64) -> Vec<i16> {
        let num_samples = self.config.samples_for(duration);
        let sample_rate = self.config.sample_rate as f64;
        let angular_freq = 2.0 * PI * frequency / sample_rate;

        (0..num_samples)
            .map(|n| (self.config.amplitude * (angular_freq * n as f64).sin()) as i16)
            .collect()
    }

    /// Modulate a bitstream, one tone of `bit_duration` per bit.
    ///
    /// Output length is always `bits.len() * samples_per_bit`.
    pub fn modulate(&self, bits: &[bool]) -> Vec<i16> {
        let zero_tone = self.synthesize_tone(self.config.freq_zero, self.config.bit_duration);
        let one_tone = self.synthesize_tone(self.config.freq_one, self.config.bit_duration);

        let mut samples = Vec::with_capacity(bits.len() * self.config.samples_per_bit());
        for &bit in bits {
            let tone = if bit { &one_tone } else { &zero_tone };
            samples.extend_from_slice(tone);
        }
        samples
    }
}

impl Default for FskModulator {
    fn default() -> Self {
        Self::new(ModemConfig::default())
    }
}

/// FSK demodulator - recovers a raw bitstream from PCM samples
///
/// Every full frame gets a hard 0/1 decision based on its dominant
/// frequency. There is no magnitude or confidence threshold, so silence
/// and pure noise still produce bits; the frame synchronizer is the only
/// thing that separates payload from garbage.
pub struct FskDemodulator {
    config: ModemConfig,
    fft_planner: FftPlanner<f64>,
}

impl FskDemodulator {
    pub fn new(config: ModemConfig) -> Self {
        Self {
            config,
            fft_planner: FftPlanner::new(),
        }
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Frequency in Hz of the strongest non-negative FFT bin of a
    /// Hann-windowed frame.
    ///
    /// Ties go to the lowest bin.
    pub fn dominant_frequency(&mut self, frame: &[i16]) -> Result<f64> {
        if frame.is_empty() {
            return Err(ModemError::InsufficientData);
        }
        let window = hann_window(frame.len());
        let fft = self.fft_planner.plan_fft_forward(frame.len());
        Ok(self.peak_frequency(frame, &window, fft.as_ref()))
    }

    /// Classify a frequency as bit 1 only if strictly closer to `freq_one`.
    pub fn classify(&self, frequency: f64) -> bool {
        (frequency - self.config.freq_one).abs() < (frequency - self.config.freq_zero).abs()
    }

    /// Demodulate samples into one bit per full frame.
    /// A trailing partial frame is discarded.
    pub fn demodulate(&mut self, samples: &[i16]) -> Vec<bool> {
        let frame_len = self.config.samples_per_bit();
        if frame_len == 0 {
            return Vec::new();
        }

        let window = hann_window(frame_len);
        let fft: Arc<dyn Fft<f64>> = self.fft_planner.plan_fft_forward(frame_len);

        samples
            .chunks_exact(frame_len)
            .map(|frame| {
                let frequency = self.peak_frequency(frame, &window, fft.as_ref());
                self.classify(frequency)
            })
            .collect()
    }

    fn peak_frequency(&self, frame: &[i16], window: &[f64], fft: &dyn Fft<f64>) -> f64 {
        let n = frame.len();
        let mut spectrum: Vec<Complex<f64>> = frame
            .iter()
            .zip(window.iter())
            .map(|(&sample, &weight)| Complex::new(sample as f64 * weight, 0.0))
            .collect();

        fft.process(&mut spectrum);

        // Real input: only the first half of the spectrum is meaningful
        let half = n / 2;
        let mut max_bin = 0;
        let mut max_magnitude = f64::NEG_INFINITY;
        for (bin, value) in spectrum[..half.max(1)].iter().enumerate() {
            let magnitude = value.norm();
            if magnitude > max_magnitude {
                max_magnitude = magnitude;
                max_bin = bin;
            }
        }

        max_bin as f64 * self.config.sample_rate as f64 / n as f64
    }
}

impl Default for FskDemodulator {
    fn default() -> Self {
        Self::new(ModemConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window_shape() {
        let window = hann_window(5);
        assert_eq!(window.len(), 5);
        assert!(window[0].abs() < 1e-12);
        assert!((window[2] - 1.0).abs() < 1e-12);
        assert!(window[4].abs() < 1e-12);
        assert!((window[1] - window[3]).abs() < 1e-12);

        assert_eq!(hann_window(1), vec![1.0]);
        assert!(hann_window(0).is_empty());
    }

    #[test]
    fn test_tone_length_and_phase_origin() {
        let modulator = FskModulator::default();
        let tone = modulator.synthesize_tone(1000.0, 0.02);
        assert_eq!(tone.len(), 882);
        assert_eq!(tone[0], 0);
        assert!(tone.iter().all(|&s| (s as i32).abs() <= 16_000));
        assert!(tone.iter().any(|&s| s > 15_000));
    }

    #[test]
    fn test_tone_sample_values() {
        let modulator = FskModulator::default();
        let tone = modulator.synthesize_tone(1000.0, 0.02);
        let expected = (16_000.0 * (2.0 * PI * 1000.0 / 44_100.0 * 7.0).sin()) as i16;
        assert_eq!(tone[7], expected);
    }

    #[test]
    fn test_modulate_length() {
        let modulator = FskModulator::default();
        for len in [0usize, 1, 8, 13] {
            let bits: Vec<bool> = (0..len).map(|i| i % 3 == 0).collect();
            assert_eq!(modulator.modulate(&bits).len(), len * 882);
        }
    }

    #[test]
    fn test_modulate_restarts_phase_per_bit() {
        let modulator = FskModulator::default();
        let samples = modulator.modulate(&[true, true]);
        assert_eq!(samples[..882], samples[882..]);
    }

    #[test]
    fn test_dominant_frequency_of_pure_tones() {
        let modulator = FskModulator::default();
        let mut demodulator = FskDemodulator::default();

        for freq in [1000.0, 1500.0, 2000.0] {
            let tone = modulator.synthesize_tone(freq, 0.02);
            let detected = demodulator.dominant_frequency(&tone).unwrap();
            assert!(
                (detected - freq).abs() < 1e-9,
                "expected {} Hz, detected {} Hz",
                freq,
                detected
            );
        }
    }

    #[test]
    fn test_dominant_frequency_of_off_bin_tone() {
        let modulator = FskModulator::default();
        let mut demodulator = FskDemodulator::default();
        let bin_width = 44_100.0 / 882.0;

        for freq in [1025.0, 1340.0, 1980.0] {
            let tone = modulator.synthesize_tone(freq, 0.02);
            let detected = demodulator.dominant_frequency(&tone).unwrap();
            assert!(
                (detected - freq).abs() <= bin_width,
                "expected {} Hz within one bin, detected {} Hz",
                freq,
                detected
            );
        }
    }

    #[test]
    fn test_dominant_frequency_of_silence_is_dc() {
        let mut demodulator = FskDemodulator::default();
        let detected = demodulator.dominant_frequency(&[0i16; 882]).unwrap();
        assert_eq!(detected, 0.0);
    }

    #[test]
    fn test_dominant_frequency_rejects_empty_frame() {
        let mut demodulator = FskDemodulator::default();
        assert!(matches!(
            demodulator.dominant_frequency(&[]),
            Err(ModemError::InsufficientData)
        ));
    }

    #[test]
    fn test_classify_boundaries() {
        let demodulator = FskDemodulator::default();
        assert!(!demodulator.classify(1000.0));
        assert!(demodulator.classify(2000.0));
        assert!(demodulator.classify(1550.0));
        assert!(!demodulator.classify(1450.0));
        // Equidistant resolves to 0
        assert!(!demodulator.classify(1500.0));
        assert!(!demodulator.classify(0.0));
    }

    #[test]
    fn test_demodulate_recovers_bits() {
        let modulator = FskModulator::default();
        let mut demodulator = FskDemodulator::default();
        let bits = vec![true, false, true, true, false, false, true, false, true];
        let samples = modulator.modulate(&bits);
        assert_eq!(demodulator.demodulate(&samples), bits);
    }

    #[test]
    fn test_demodulate_discards_partial_frame() {
        let modulator = FskModulator::default();
        let mut demodulator = FskDemodulator::default();
        let mut samples = modulator.modulate(&[true, false]);
        samples.extend_from_slice(&modulator.synthesize_tone(2000.0, 0.01));
        assert_eq!(demodulator.demodulate(&samples), vec![true, false]);

        assert!(demodulator.demodulate(&samples[..881]).is_empty());
    }

    #[test]
    fn test_demodulate_silence_forces_zero_bits() {
        let mut demodulator = FskDemodulator::default();
        let bits = demodulator.demodulate(&vec![0i16; 882 * 3]);
        assert_eq!(bits, vec![false, false, false]);
    }

    #[test]
    fn test_alternate_profile_round_trip() {
        let config = ModemConfig::default().with_bit_duration(0.01);
        let modulator = FskModulator::new(config);
        let mut demodulator = FskDemodulator::new(config);
        let bits = vec![false, true, true, false, true];
        let samples = modulator.modulate(&bits);
        assert_eq!(samples.len(), bits.len() * 441);
        assert_eq!(demodulator.demodulate(&samples), bits);
    }
}
