//! Cipher parameters taken from the host form.
//!
//! Iteration count and seed are accepted, clamped and carried on every
//! instance, but nothing in the codec or renderer reads them yet.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ITERATIONS: u32 = 5;
pub const DEFAULT_SEED: u32 = 42;
pub const ITERATIONS_RANGE: (u32, u32) = (1, 20);
pub const SEED_RANGE: (u32, u32) = (1, 1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherConfig {
    pub iterations: u32,
    pub seed: u32,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl CipherConfig {
    /// Build a config, clamping both values into range.
    pub fn new(iterations: i64, seed: i64) -> Self {
        Self {
            iterations: clamp(iterations, ITERATIONS_RANGE),
            seed: clamp(seed, SEED_RANGE),
        }
    }

    /// Build a config from raw form text.
    ///
    /// Each field is read like `parseInt`: leading whitespace, an optional
    /// sign, an optional `0x` prefix, then as many digits as are present. A
    /// field with no digits, or one that reads as zero, falls back to its
    /// default before clamping.
    pub fn from_fields(iterations: &str, seed: &str) -> Self {
        let or_default = |field: &str, default: u32| match parse_leading_int(field) {
            Some(0) | None => i64::from(default),
            Some(v) => v,
        };
        Self::new(
            or_default(iterations, DEFAULT_ITERATIONS),
            or_default(seed, DEFAULT_SEED),
        )
    }
}

fn clamp(value: i64, (lo, hi): (u32, u32)) -> u32 {
    value.clamp(i64::from(lo), i64::from(hi)) as u32
}

/// Parse the integer prefix of `s`, saturating on overflow.
///
/// A `0x`/`0X` prefix switches to hexadecimal.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for d in digits.chars().map_while(|c| c.to_digit(radix)) {
        seen = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
    }

    seen.then_some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = CipherConfig::default();
        assert_eq!((c.iterations, c.seed), (5, 42));
    }

    #[test]
    fn new_clamps() {
        assert_eq!(CipherConfig::new(0, 0), CipherConfig { iterations: 1, seed: 1 });
        assert_eq!(
            CipherConfig::new(99, 5000),
            CipherConfig { iterations: 20, seed: 1000 }
        );
        assert_eq!(CipherConfig::new(7, 300), CipherConfig { iterations: 7, seed: 300 });
    }

    #[test]
    fn fields_fall_back_to_defaults() {
        assert_eq!(CipherConfig::from_fields("", ""), CipherConfig::default());
        assert_eq!(CipherConfig::from_fields("abc", "0"), CipherConfig::default());
    }

    #[test]
    fn fields_parse_integer_prefix() {
        assert_eq!(
            CipherConfig::from_fields("  12px", "3.9"),
            CipherConfig { iterations: 12, seed: 3 }
        );
        assert_eq!(
            CipherConfig::from_fields("-4", "+2000"),
            CipherConfig { iterations: 1, seed: 1000 }
        );
    }

    #[test]
    fn fields_accept_hex_prefix() {
        assert_eq!(
            CipherConfig::from_fields("0x10", "0x1F"),
            CipherConfig { iterations: 16, seed: 31 }
        );
        assert_eq!(parse_leading_int("-0Xff"), Some(-255));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0"), Some(0));
    }

    #[test]
    fn parse_leading_int_edges() {
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(" 42 "), Some(42));
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn serde_round_trip() {
        let c = CipherConfig::new(9, 77);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"iterations":9,"seed":77}"#);
        let back: CipherConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
