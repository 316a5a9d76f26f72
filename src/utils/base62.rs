//! Base-62 encoding of counter values into short codes.
//!
//! Alphabet order is digits, then lowercase, then uppercase, so small values
//! encode to the same strings as ordinary decimal digits.

use crate::error::AppError;
use serde_json::json;

/// The 62 symbols, indexed by digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = 62;

/// Encodes a non-negative integer, most significant digit first.
///
/// `encode(0)` is `"0"`. The longest output (for `u64::MAX`) is 11 characters.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize] as char);
        n /= BASE;
    }

    digits.iter().rev().collect()
}

/// Decodes a short code back into its integer value.
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] if the input is empty, contains a
/// character outside [`ALPHABET`], or does not fit in a `u64`.
pub fn decode(code: &str) -> Result<u64, AppError> {
    if code.is_empty() {
        return Err(AppError::invalid_argument(
            "Short code must not be empty",
            json!({}),
        ));
    }

    code.bytes().try_fold(0u64, |acc, byte| {
        let digit = digit_value(byte).ok_or_else(|| {
            AppError::invalid_argument(
                "Short code contains a non base-62 character",
                json!({ "code": code, "character": (byte as char).to_string() }),
            )
        })?;

        acc.checked_mul(BASE)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                AppError::invalid_argument("Short code is out of range", json!({ "code": code }))
            })
    })
}

/// Returns true if every character of `code` belongs to the alphabet.
pub fn is_valid(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| digit_value(b).is_some())
}

fn digit_value(byte: u8) -> Option<u64> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u64),
        b'a'..=b'z' => Some((byte - b'a') as u64 + 10),
        b'A'..=b'Z' => Some((byte - b'A') as u64 + 36),
        _ => None,
    }
}
