//! Base58 text encoding for parameter tokens.
//!
//! The numeral is big-endian, every leading `1` (the zero digit) stands for one
//! leading zero byte, and there's no padding.

use crate::result::{DecodeError, DecodeResult};

/// The 58 symbols, in digit order. `0`, `O`, `I` and `l` are left out.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xFF;

#[expect(clippy::cast_possible_truncation)]
const DIGITS: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

fn digit(ch: char) -> Option<u8> {
    let idx = usize::try_from(u32::from(ch)).ok()?;
    DIGITS.get(idx).copied().filter(|&d| d != INVALID)
}

/// Decode a base58 string into bytes.
///
/// The magnitude is accumulated little-endian, one digit at a time
/// (multiply by 58, add the digit, carry into the next byte), then reversed.
#[allow(clippy::cast_possible_truncation)]
pub fn decode(text: &str) -> DecodeResult<Vec<u8>> {
    let mut leading_zeros = 0;
    let mut magnitude: Vec<u8> = Vec::new();
    for (pos, ch) in text.chars().enumerate() {
        let Some(d) = digit(ch) else {
            return Err(DecodeError::InvalidChar { ch, pos });
        };
        if d == 0 && leading_zeros == pos {
            leading_zeros += 1;
        }
        let mut carry = u32::from(d);
        for byte in &mut magnitude {
            let n = u32::from(*byte) * 58 + carry;
            *byte = (n & 0xFF) as u8;
            carry = n >> 8;
        }
        while carry != 0 {
            magnitude.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }
    let mut out = vec![0; leading_zeros];
    out.extend(magnitude.iter().rev());
    Ok(out)
}

/// Encode bytes as a base58 string.
///
/// Inverse of [`decode`]: each leading zero byte becomes a leading `1`.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn encode(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    // Little-endian base58 digits
    let mut digits: Vec<u8> = Vec::new();
    for &byte in &bytes[leading_zeros..] {
        let mut carry = u32::from(byte);
        for d in &mut digits {
            let n = (u32::from(*d) << 8) + carry;
            *d = (n % 58) as u8;
            carry = n / 58;
        }
        while carry != 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }
    let mut out = String::with_capacity(leading_zeros + digits.len());
    out.extend(std::iter::repeat_n('1', leading_zeros));
    out.extend(digits.iter().rev().map(|&d| char::from(ALPHABET[usize::from(d)])));
    out
}
