//! Text ↔ binary digit codec.
//!
//! Every character becomes exactly eight `'0'`/`'1'` digits, most significant
//! bit first. There is no key and no secrecy here: the "cipher" is the bit
//! pattern itself, which the render loop turns into a ring of points.

/// Digits emitted per character.
pub const BITS_PER_CHAR: usize = 8;

/// Message returned by [`decode_binary`] when the input is not binary.
pub const DECODE_ERROR_MESSAGE: &str = "Error: Invalid encrypted data";

/// Why a binary string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// An 8-digit group contained something other than `0` or `1`.
    InvalidGroup {
        /// Zero-based index of the offending group.
        index: usize,
        /// The group as it appeared in the input.
        group: String,
    },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGroup { index, group } => {
                write!(f, "group {index} ({group:?}) is not an 8-digit binary number")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encode text as a concatenation of 8-digit binary groups.
///
/// Code points above 255 do not fit in eight digits; only their low byte is
/// kept, so such characters do not survive a round trip.
pub fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * BITS_PER_CHAR);
    for ch in text.chars() {
        let code = ch as u32;
        if code > 0xFF {
            log::warn!("character {ch:?} (U+{code:04X}) truncated to its low byte");
        }
        out.push_str(&format!("{:08b}", code & 0xFF));
    }
    out
}

/// Decode a binary string back to text.
///
/// Trailing digits that do not fill a whole group are dropped. Malformed input
/// never propagates: it is logged and replaced by [`DECODE_ERROR_MESSAGE`].
pub fn decode_binary(binary: &str) -> String {
    match try_decode_binary(binary) {
        Ok(text) => text,
        Err(e) => {
            log::error!("decryption error: {e}");
            DECODE_ERROR_MESSAGE.to_string()
        }
    }
}

/// Fallible form of [`decode_binary`].
pub fn try_decode_binary(binary: &str) -> Result<String, DecodeError> {
    let chars: Vec<char> = binary.chars().collect();
    let mut out = String::with_capacity(chars.len() / BITS_PER_CHAR);

    for (index, chunk) in chars.chunks_exact(BITS_PER_CHAR).enumerate() {
        // Strictly 0/1: no sign, no whitespace.
        if !chunk.iter().all(|&c| c == '0' || c == '1') {
            return Err(DecodeError::InvalidGroup {
                index,
                group: chunk.iter().collect(),
            });
        }
        let byte = chunk
            .iter()
            .fold(0u8, |acc, &c| (acc << 1) | u8::from(c == '1'));
        out.push(char::from(byte));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_single_char() {
        assert_eq!(encode_text("A"), "01000001");
    }

    #[test]
    fn encode_pads_small_codes() {
        assert_eq!(encode_text("\u{1}"), "00000001");
        assert_eq!(encode_text("\0"), "00000000");
    }

    #[test]
    fn encode_preserves_order() {
        assert_eq!(encode_text("Hi"), "0100100001101001");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(encode_text(""), "");
        assert_eq!(decode_binary(""), "");
    }

    #[test]
    fn decode_single_group() {
        assert_eq!(decode_binary("01000001"), "A");
    }

    #[test]
    fn decode_drops_incomplete_group() {
        assert_eq!(decode_binary("0100000"), "");
        assert_eq!(decode_binary("01000001011"), "A");
    }

    #[test]
    fn decode_rejects_non_binary() {
        assert_eq!(decode_binary("0100000x"), DECODE_ERROR_MESSAGE);
        assert_eq!(decode_binary("+1000001"), DECODE_ERROR_MESSAGE);
        assert_eq!(decode_binary("hello world!"), DECODE_ERROR_MESSAGE);
    }

    #[test]
    fn try_decode_reports_group_index() {
        let err = try_decode_binary("0100000101x00001").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidGroup {
                index: 1,
                group: "01x00001".to_string()
            }
        );
        assert!(err.to_string().contains("group 1"));
    }

    #[test]
    fn latin1_round_trip() {
        let s: String = (0u8..=255).map(char::from).collect();
        let bits = encode_text(&s);
        assert_eq!(bits.len(), 256 * BITS_PER_CHAR);
        assert_eq!(decode_binary(&bits), s);
    }

    #[test]
    fn wide_chars_keep_eight_digits() {
        // U+0141 → low byte 0x41 ('A').
        let bits = encode_text("Ł");
        assert_eq!(bits, "01000001");
        assert_eq!(decode_binary(&bits), "A");
    }
}
