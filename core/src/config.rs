use crate::error::{ModemError, Result};
use crate::{AMPLITUDE, BIT_DURATION_SECS, FREQ_ONE, FREQ_ZERO, SAMPLE_RATE};

/// Tone parameters shared by the modulator and demodulator.
///
/// The default profile is the wire format: 44.1 kHz, 20 ms per bit,
/// 1000 Hz for `0` and 2000 Hz for `1`. Alternate profiles are mostly
/// useful in tests (e.g. a faster bit rate to keep fixtures short).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration of one bit in seconds
    pub bit_duration: f64,
    /// Peak amplitude of the synthesized tone (of max 32767)
    pub amplitude: f64,
    /// Tone frequency for bit `0` in Hz
    pub freq_zero: f64,
    /// Tone frequency for bit `1` in Hz
    pub freq_one: f64,
}

impl ModemConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            bit_duration: BIT_DURATION_SECS,
            amplitude: AMPLITUDE,
            freq_zero: FREQ_ZERO,
            freq_one: FREQ_ONE,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_bit_duration(mut self, bit_duration: f64) -> Self {
        self.bit_duration = bit_duration;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_frequencies(mut self, freq_zero: f64, freq_one: f64) -> Self {
        self.freq_zero = freq_zero;
        self.freq_one = freq_one;
        self
    }

    /// Number of samples covering `duration` seconds at this sample rate.
    pub fn samples_for(&self, duration: f64) -> usize {
        (self.sample_rate as f64 * duration).round().max(0.0) as usize
    }

    /// Samples per bit frame (882 for the default profile)
    pub fn samples_per_bit(&self) -> usize {
        self.samples_for(self.bit_duration)
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ModemError::InvalidConfig("sample rate must be non-zero".into()));
        }
        if !(self.bit_duration > 0.0) || self.samples_per_bit() == 0 {
            return Err(ModemError::InvalidConfig(format!(
                "bit duration {}s yields no samples at {} Hz",
                self.bit_duration, self.sample_rate
            )));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= i16::MAX as f64) {
            return Err(ModemError::InvalidConfig(format!(
                "amplitude {} must lie in (0, {}]",
                self.amplitude,
                i16::MAX
            )));
        }
        for freq in [self.freq_zero, self.freq_one] {
            if !(freq > 0.0 && freq < self.nyquist()) {
                return Err(ModemError::InvalidConfig(format!(
                    "tone frequency {} Hz must lie in (0, {}) Hz",
                    freq,
                    self.nyquist()
                )));
            }
        }
        if self.freq_zero == self.freq_one {
            return Err(ModemError::InvalidConfig(
                "bit 0 and bit 1 tones must differ".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self::new()
    }
}
