use crate::error::{ModemError, Result};

/// Synchronization pattern sent ahead of every payload
pub const PREAMBLE: [bool; 8] = [true, false, true, false, true, false, true, false];

/// Expand bytes into bits, MSB first
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Pack bits into bytes, MSB first.
/// A trailing group shorter than 8 bits is dropped.
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            if bit {
                byte |= 1 << (7 - i);
            }
        }
        bytes.push(byte);
    }
    bytes
}

/// Encode text as 8 bits per character.
///
/// Characters are mapped as Latin-1: code points up to 255 become that
/// byte value. Anything wider cannot be carried by a single byte and is
/// rejected rather than truncated.
pub fn text_to_bits(text: &str) -> Result<Vec<bool>> {
    let mut bytes = Vec::with_capacity(text.len());
    for (position, ch) in text.chars().enumerate() {
        let code = ch as u32;
        if code > 0xFF {
            return Err(ModemError::UnrepresentableChar { ch, position });
        }
        bytes.push(code as u8);
    }
    Ok(bytes_to_bits(&bytes))
}

/// Decode 8-bit groups back into characters (Latin-1).
pub fn bits_to_text(bits: &[bool]) -> String {
    bits_to_bytes(bits).into_iter().map(char::from).collect()
}
