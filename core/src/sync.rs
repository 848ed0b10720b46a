//! Frame synchronization on the demodulated bitstream
//!
//! The demodulator emits one bit per frame for the whole buffer, including
//! any leading silence or noise. The synchronizer searches for the preamble
//! bit pattern and keeps only what follows it.

/// Index of the first contiguous occurrence of `preamble` in `bits`
pub fn find_preamble(bits: &[bool], preamble: &[bool]) -> Option<usize> {
    if preamble.is_empty() {
        return Some(0);
    }
    bits.windows(preamble.len()).position(|window| window == preamble)
}

/// Strip everything up to and including the first preamble.
///
/// If the preamble never occurs the input is returned unmodified, so a
/// missed sync degrades into garbled text rather than an error.
pub fn synchronize<'a>(bits: &'a [bool], preamble: &[bool]) -> &'a [bool] {
    match find_preamble(bits, preamble) {
        Some(index) => {
            log::debug!("Preamble found at bit {}", index);
            &bits[index + preamble.len()..]
        }
        None => {
            log::warn!(
                "Preamble not found in {} demodulated bits, decoding unaligned stream",
                bits.len()
            );
            bits
        }
    }
}
