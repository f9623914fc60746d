//! GSM 03.38 default alphabet codec.
//!
//! The default alphabet maps 128 code points into single bytes; ten more
//! characters live on an extension plane reached through the 0x1B escape
//! byte. Neither plane is ASCII-compatible outside the letters and digits,
//! so this is a bespoke table-driven codec rather than a standard charset.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::EncodingError;

/// Escape byte selecting the extension plane.
const ESCAPE: u8 = 0x1B;

const QUESTION_MARK: u8 = 0x3F;

/// Filler emitted for an escape sequence that does not resolve.
const FILLER: char = '\u{A0}';

/// Default plane, indexed by GSM byte. Index 0x1B is the escape prefix and
/// never produced by a table lookup.
const GSM_TO_UNICODE: [char; 128] = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', // 0x00
    'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å', // 0x08
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', // 0x10
    'Σ', 'Θ', 'Ξ', FILLER, 'Æ', 'æ', 'ß', 'É', // 0x18
    ' ', '!', '"', '#', '¤', '%', '&', '\'', // 0x20
    '(', ')', '*', '+', ',', '-', '.', '/', // 0x28
    '0', '1', '2', '3', '4', '5', '6', '7', // 0x30
    '8', '9', ':', ';', '<', '=', '>', '?', // 0x38
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', // 0x40
    'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', // 0x48
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', // 0x50
    'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§', // 0x58
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', // 0x60
    'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', // 0x68
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', // 0x70
    'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à', // 0x78
];

/// Extension plane, reached by the 0x1B prefix.
const ESCAPED_GSM_TO_UNICODE: &[(u8, char)] = &[
    (0x0A, '\u{0C}'), // FORM FEED
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

// Near-miss substitutions used by the `Replace` policy, where a lossy
// conversion is acceptable (human-read SMS rather than M2M payloads).
const REPLACEMENTS: &[(char, u8)] = &[
    ('ç', 0x09),
    ('Α', 0x41),
    ('Β', 0x42),
    ('Ε', 0x45),
    ('Η', 0x48),
    ('Ι', 0x49),
    ('Κ', 0x4B),
    ('Μ', 0x4D),
    ('Ν', 0x4E),
    ('Ο', 0x4F),
    ('Ρ', 0x50),
    ('Τ', 0x54),
    ('Χ', 0x58),
    ('Υ', 0x59),
    ('Ζ', 0x5A),
];

/// What to do with characters outside both planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Fail the conversion.
    #[default]
    Strict,
    /// Substitute a lookalike, falling back to `?`.
    Replace,
    /// Drop the character.
    Ignore,
}

fn unicode_to_gsm() -> &'static HashMap<char, u8> {
    static MAP: OnceLock<HashMap<char, u8>> = OnceLock::new();
    MAP.get_or_init(|| {
        GSM_TO_UNICODE
            .iter()
            .enumerate()
            .filter(|&(gsm, _)| gsm != ESCAPE as usize)
            .map(|(gsm, &uni)| (uni, gsm as u8))
            .collect()
    })
}

fn unicode_to_gsm_escaped() -> &'static HashMap<char, u8> {
    static MAP: OnceLock<HashMap<char, u8>> = OnceLock::new();
    MAP.get_or_init(|| {
        ESCAPED_GSM_TO_UNICODE
            .iter()
            .map(|&(gsm, uni)| (uni, gsm))
            .collect()
    })
}

fn replacement_for(c: char) -> u8 {
    REPLACEMENTS
        .iter()
        .find(|&&(uni, _)| uni == c)
        .map(|&(_, gsm)| gsm)
        .unwrap_or(QUESTION_MARK)
}

/// Encode text into GSM 03.38 bytes.
pub fn encode(text: &str, errors: ErrorPolicy) -> Result<Vec<u8>, EncodingError> {
    let default_plane = unicode_to_gsm();
    let escape_plane = unicode_to_gsm_escaped();

    let mut encoded = Vec::with_capacity(text.len());
    for c in text.chars() {
        if let Some(&gsm) = default_plane.get(&c) {
            encoded.push(gsm);
        } else if let Some(&gsm) = escape_plane.get(&c) {
            encoded.push(ESCAPE);
            encoded.push(gsm);
        } else {
            match errors {
                ErrorPolicy::Strict => return Err(EncodingError::UnmappableChar(c)),
                ErrorPolicy::Replace => encoded.push(replacement_for(c)),
                ErrorPolicy::Ignore => {}
            }
        }
    }
    Ok(encoded)
}

/// Decode GSM 03.38 bytes into text.
///
/// An escape followed by an unknown byte, or a stray escape at end of input,
/// decodes to U+00A0.
pub fn decode(data: &[u8], errors: ErrorPolicy) -> Result<String, EncodingError> {
    let mut decoded = String::with_capacity(data.len());
    let mut bytes = data.iter();
    while let Some(&b) = bytes.next() {
        if b == ESCAPE {
            match bytes.next() {
                Some(&escaped) => decoded.push(
                    ESCAPED_GSM_TO_UNICODE
                        .iter()
                        .find(|&&(gsm, _)| gsm == escaped)
                        .map(|&(_, uni)| uni)
                        .unwrap_or(FILLER),
                ),
                None => decoded.push(FILLER),
            }
        } else if b < 0x80 {
            decoded.push(GSM_TO_UNICODE[b as usize]);
        } else {
            match errors {
                ErrorPolicy::Strict => return Err(EncodingError::UnmappableByte(b)),
                ErrorPolicy::Replace => decoded.push('?'),
                ErrorPolicy::Ignore => {}
            }
        }
    }
    Ok(decoded)
}

/// Pack 7-bit-clean bytes into the GSM septet layout, gaining one byte for
/// every eight.
///
/// Packing runs right to left: each byte of the reversed input contributes
/// its low seven bits MSB-first, `padding` zero bits are appended, the front
/// is zero-extended to a whole number of octets, and the resulting byte
/// sequence is reversed back.
pub fn pack_7bit(data: &[u8], padding: usize) -> Vec<u8> {
    let total_bits = data.len() * 7 + padding;
    let lead = (8 - total_bits % 8) % 8;

    let mut bits = Vec::with_capacity(lead + total_bits);
    bits.extend(std::iter::repeat_n(0u8, lead));
    for &b in data.iter().rev() {
        for shift in (0..7).rev() {
            bits.push((b >> shift) & 1);
        }
    }
    bits.extend(std::iter::repeat_n(0u8, padding));

    let mut packed: Vec<u8> = bits
        .chunks(8)
        .map(|octet| octet.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect();
    packed.reverse();
    packed
}

/// Exact inverse of [`pack_7bit`].
pub fn unpack_7bit(data: &[u8], padding: usize) -> Vec<u8> {
    let mut bits = Vec::with_capacity(data.len() * 8);
    for &b in data.iter().rev() {
        for shift in (0..8).rev() {
            bits.push((b >> shift) & 1);
        }
    }
    if padding > 0 && padding <= bits.len() {
        bits.truncate(bits.len() - padding);
    }

    let mut unpacked = Vec::with_capacity(bits.len() / 7);
    while bits.len() >= 7 {
        let tail = &bits[bits.len() - 7..];
        unpacked.push(tail.iter().fold(0u8, |acc, &bit| (acc << 1) | bit));
        bits.truncate(bits.len() - 7);
    }
    unpacked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_passes_through() {
        let encoded = encode("Abc1234", ErrorPolicy::Strict).unwrap();
        assert_eq!(encoded, vec![0x41, 0x62, 0x63, 0x31, 0x32, 0x33, 0x34]);
        assert_eq!(decode(&encoded, ErrorPolicy::Strict).unwrap(), "Abc1234");
    }

    #[test]
    fn mixed_planes_encode_and_decode() {
        let text = "ü and € is à";
        let encoded = encode(text, ErrorPolicy::Strict).unwrap();
        assert_eq!(
            encoded,
            vec![0x7E, 0x20, 0x61, 0x6E, 0x64, 0x20, 0x1B, 0x65, 0x20, 0x69, 0x73, 0x20, 0x7F]
        );
        assert_eq!(decode(&encoded, ErrorPolicy::Strict).unwrap(), text);
    }

    #[test]
    fn curly_brackets_use_the_escape_plane() {
        let encoded = encode("{ brackets text }", ErrorPolicy::Strict).unwrap();
        assert_eq!(
            encoded,
            vec![
                0x1B, 0x28, 0x20, 0x62, 0x72, 0x61, 0x63, 0x6B, 0x65, 0x74, 0x73, 0x20, 0x74,
                0x65, 0x78, 0x74, 0x20, 0x1B, 0x29
            ]
        );
    }

    #[test]
    fn every_table_character_round_trips() {
        for gsm in 0u8..0x80 {
            if gsm == 0x1B {
                continue;
            }
            let c = GSM_TO_UNICODE[gsm as usize];
            let encoded = encode(&c.to_string(), ErrorPolicy::Strict).unwrap();
            assert_eq!(encoded, vec![gsm], "character {c:?}");
            assert_eq!(decode(&encoded, ErrorPolicy::Strict).unwrap(), c.to_string());
        }
        for &(gsm, c) in ESCAPED_GSM_TO_UNICODE {
            let encoded = encode(&c.to_string(), ErrorPolicy::Strict).unwrap();
            assert_eq!(encoded, vec![0x1B, gsm], "escaped character {c:?}");
            assert_eq!(decode(&encoded, ErrorPolicy::Strict).unwrap(), c.to_string());
        }
    }

    #[test]
    fn encode_error_policies() {
        assert!(matches!(
            encode("可", ErrorPolicy::Strict),
            Err(EncodingError::UnmappableChar('可'))
        ));
        // 'ç' has a lookalike, anything else becomes a question mark
        assert_eq!(encode("ç", ErrorPolicy::Replace).unwrap(), vec![0x09]);
        assert_eq!(encode("可", ErrorPolicy::Replace).unwrap(), vec![0x3F]);
        assert_eq!(encode("可x", ErrorPolicy::Ignore).unwrap(), vec![0x78]);
    }

    #[test]
    fn decode_error_policies() {
        assert!(matches!(
            decode(&[0x80], ErrorPolicy::Strict),
            Err(EncodingError::UnmappableByte(0x80))
        ));
        assert_eq!(decode(&[0x80], ErrorPolicy::Replace).unwrap(), "?");
        assert_eq!(decode(&[0x80, 0x41], ErrorPolicy::Ignore).unwrap(), "A");
    }

    #[test]
    fn stray_and_unknown_escapes_become_filler() {
        // Trailing escape at end of input
        assert_eq!(decode(&[0x41, 0x1B], ErrorPolicy::Strict).unwrap(), "A\u{A0}");
        // Escape followed by a byte outside the extension plane
        assert_eq!(
            decode(&[0x1B, 0x41], ErrorPolicy::Strict).unwrap(),
            "\u{A0}"
        );
    }

    #[test]
    fn seven_bit_packing_known_vector() {
        let gsm = encode("7bit", ErrorPolicy::Strict).unwrap();
        assert_eq!(gsm, vec![0x37, 0x62, 0x69, 0x74]);
        assert_eq!(pack_7bit(&gsm, 0), vec![0x37, 0x71, 0x9A, 0x0E]);
        assert_eq!(
            unpack_7bit(&[0x37, 0x71, 0x9A, 0x0E], 0),
            vec![0x37, 0x62, 0x69, 0x74]
        );
    }

    #[test]
    fn seven_bit_packing_inverse() {
        let samples: &[&[u8]] = &[
            b"",
            b"a",
            b"ab",
            b"abcdefg",
            b"abcdefgh",
            b"The quick brown fox jumps over the lazy dog",
        ];
        for &sample in samples {
            for padding in 0..7 {
                assert_eq!(
                    unpack_7bit(&pack_7bit(sample, padding), padding),
                    sample.to_vec(),
                    "sample {sample:?} padding {padding}"
                );
            }
        }
    }
}
