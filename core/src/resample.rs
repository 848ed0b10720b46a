/// Audio resampling for containers recorded at a different sample rate
/// Uses linear interpolation, which is plenty for two tones well below Nyquist

/// Resample 16-bit PCM to a target sample rate using linear interpolation
///
/// # Arguments
/// * `samples` - Input PCM samples
/// * `from_rate` - Current sample rate in Hz
/// * `to_rate` - Target sample rate in Hz
///
/// # Returns
/// Resampled PCM at the target sample rate
///
/// # Example
/// ```
/// use fskwave_core::resample::resample_pcm;
///
/// let pcm_48k = vec![0i16, 300, 600, 900, 1200, 1500];
/// let pcm_16k = resample_pcm(&pcm_48k, 48_000, 16_000);
/// assert_eq!(pcm_16k, vec![0, 900]);
/// ```
pub fn resample_pcm(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let new_length = ((samples.len() as f64) * ratio).ceil() as usize;
    let mut resampled = Vec::with_capacity(new_length);

    for i in 0..new_length {
        let src_idx = i as f64 / ratio;
        let src_idx_floor = (src_idx.floor() as usize).min(samples.len() - 1);
        let src_idx_ceil = src_idx_floor + 1;
        let fraction = src_idx - (src_idx_floor as f64);

        let interpolated = if src_idx_ceil < samples.len() {
            samples[src_idx_floor] as f64 * (1.0 - fraction) + samples[src_idx_ceil] as f64 * fraction
        } else {
            samples[src_idx_floor] as f64
        };

        resampled.push(interpolated.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16);
    }

    resampled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_same_rate() {
        let samples = vec![1, 2, 3, 4];
        let resampled = resample_pcm(&samples, 44_100, 44_100);
        assert_eq!(resampled, samples);
    }

    #[test]
    fn test_resample_downsample() {
        let samples: Vec<i16> = (0..8).map(|i| i * 100).collect();
        let resampled = resample_pcm(&samples, 48_000, 16_000); // 3x downsample
        assert!(resampled.len() < samples.len());
        // Should have approximately 1/3 the samples
        assert!(resampled.len() >= (samples.len() / 3) - 1);
        assert!(resampled.len() <= (samples.len() / 3) + 1);
        assert_eq!(resampled[0], 0);
        assert_eq!(resampled[1], 300);
    }

    #[test]
    fn test_resample_upsample_interpolates() {
        let samples = vec![0, 300, 600];
        let resampled = resample_pcm(&samples, 16_000, 48_000); // 3x upsample
        assert_eq!(resampled.len(), 9);
        assert_eq!(&resampled[..7], &[0, 100, 200, 300, 400, 500, 600]);
        // Past the last source sample the value is held
        assert_eq!(resampled[8], 600);
    }

    #[test]
    fn test_resample_preserves_value_range() {
        let samples = vec![i16::MAX, i16::MIN, i16::MAX, 0, i16::MIN];
        let resampled = resample_pcm(&samples, 16_000, 22_050);
        assert!(resampled.len() > samples.len());
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample_pcm(&[], 48_000, 44_100).is_empty());
    }
}
