//! Hexadecimal float text encoding.
//!
//! PIX text files never store floats as decimal text. Every float is written
//! as its IEEE-754 bit pattern in big-endian hex, prefixed with `&`:
//!
//! ```text
//! 1.0f32  -> &3f800000
//! -2.5f32 -> &c0200000
//! ```
//!
//! The encoding is locale independent and survives a text round-trip
//! bit-exactly, including `-0.0`, subnormals, infinities and every NaN payload.

use std::fmt::Write as _;

use thiserror::Error;

/// Prefix marking a hex float token.
pub const HEX_PREFIX: char = '&';

/// Number of hex digits in an encoded `f32`.
pub const F32_DIGITS: usize = 8;

/// Number of hex digits in an encoded `f64`.
pub const F64_DIGITS: usize = 16;

/// Errors produced when decoding a hex float token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexFloatError {
    /// Token does not start with `&`
    #[error("hex float token {0:?} is missing the '&' prefix")]
    MissingPrefix(String),

    /// Token has the wrong number of digits
    #[error("hex float token {token:?} has {found} digits, expected {expected}")]
    InvalidLength {
        token: String,
        expected: usize,
        found: usize,
    },

    /// Token contains a non-hex character
    #[error("hex float token {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// Encode a single-precision float, e.g. `1.0` -> `&3f800000`.
#[inline]
pub fn encode_f32(value: f32) -> String {
    let mut out = String::with_capacity(F32_DIGITS + 1);
    push_f32(&mut out, value);
    out
}

/// Append the encoding of `value` to `out` without allocating.
#[inline]
pub fn push_f32(out: &mut String, value: f32) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{}{:08x}", HEX_PREFIX, value.to_bits());
}

/// Encode a double-precision float with its full 64-bit pattern.
#[inline]
pub fn encode_f64(value: f64) -> String {
    format!("{}{:016x}", HEX_PREFIX, value.to_bits())
}

/// Encode every element and join them with a single space.
pub fn encode_array(values: &[f32]) -> String {
    let mut out = String::with_capacity(values.len() * (F32_DIGITS + 2));
    for (i, &value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        push_f32(&mut out, value);
    }
    out
}

/// Decode an `&xxxxxxxx` token back to the exact `f32`.
pub fn decode_f32(token: &str) -> Result<f32, HexFloatError> {
    decode_bits(token, F32_DIGITS).map(|bits| f32::from_bits(bits as u32))
}

/// Decode an `&xxxxxxxxxxxxxxxx` token back to the exact `f64`.
pub fn decode_f64(token: &str) -> Result<f64, HexFloatError> {
    decode_bits(token, F64_DIGITS).map(f64::from_bits)
}

/// Check whether a token looks like a hex float (prefix only, no validation).
#[inline]
pub fn is_hex_token(token: &str) -> bool {
    token.starts_with(HEX_PREFIX)
}

fn decode_bits(token: &str, digits: usize) -> Result<u64, HexFloatError> {
    let hex = token
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| HexFloatError::MissingPrefix(token.to_string()))?;

    if hex.len() != digits {
        return Err(HexFloatError::InvalidLength {
            token: token.to_string(),
            expected: digits,
            found: hex.len(),
        });
    }

    // from_str_radix accepts a leading '+', the format does not.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexFloatError::InvalidDigit(token.to_string()));
    }

    u64::from_str_radix(hex, 16).map_err(|_| HexFloatError::InvalidDigit(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(encode_f32(1.0), "&3f800000");
        assert_eq!(encode_f32(-2.5), "&c0200000");
        assert_eq!(encode_f32(0.0), "&00000000");
        assert_eq!(encode_f32(-0.0), "&80000000");
        assert_eq!(encode_f32(f32::INFINITY), "&7f800000");
        assert_eq!(encode_f32(f32::NEG_INFINITY), "&ff800000");
    }

    #[test]
    fn test_roundtrip_special_values() {
        let values = [
            0.0f32,
            -0.0,
            1.0,
            -1.0,
            f32::MIN_POSITIVE,
            f32::from_bits(1), // smallest subnormal
            f32::from_bits(0x007f_ffff), // largest subnormal
            f32::MAX,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            f32::from_bits(0x7fc0_1234), // NaN with payload
        ];

        for value in values {
            let decoded = decode_f32(&encode_f32(value)).unwrap();
            assert_eq!(decoded.to_bits(), value.to_bits(), "value {:?}", value);
        }
    }

    #[test]
    fn test_roundtrip_f64() {
        for value in [0.0f64, -0.0, 0.1, 1e-310, f64::NAN, f64::INFINITY] {
            let text = encode_f64(value);
            assert_eq!(text.len(), F64_DIGITS + 1);
            assert_eq!(decode_f64(&text).unwrap().to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_encode_array() {
        assert_eq!(encode_array(&[]), "");
        assert_eq!(encode_array(&[1.0]), "&3f800000");
        assert_eq!(
            encode_array(&[1.0, 2.0, 3.0]),
            "&3f800000 &40000000 &40400000"
        );
    }

    #[test]
    fn test_nan_is_not_decimal() {
        let text = encode_f32(f32::NAN);
        assert!(is_hex_token(&text));
        assert!(!text.to_lowercase().contains("nan"));
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_f32("3f800000"),
            Err(HexFloatError::MissingPrefix(_))
        ));
        assert!(matches!(
            decode_f32("&3f80"),
            Err(HexFloatError::InvalidLength { found: 4, .. })
        ));
        assert!(matches!(
            decode_f32("&3f80000g"),
            Err(HexFloatError::InvalidDigit(_))
        ));
        assert!(matches!(
            decode_f32("&+f800000"),
            Err(HexFloatError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_decode_uppercase() {
        assert_eq!(decode_f32("&3F800000").unwrap(), 1.0);
    }
}
