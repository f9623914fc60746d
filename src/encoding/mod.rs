//! Text encodings for short message content.
//!
//! The data_coding field of a short message selects the character set used
//! for its bytes. GSM 03.38 is implemented in [`gsm0338`]; the ISO-8859
//! variants ride on `encoding_rs`, UCS-2 is UTF-16-BE, and the binary
//! codings pass bytes through untouched.

pub mod gsm0338;

use crate::error::EncodingError;

/// data_coding values from the SMPP v3.4 table.
pub mod data_coding {
    /// SMSC default alphabet (GSM 03.38).
    pub const DEFAULT: u8 = 0x00;
    pub const IA5: u8 = 0x01;
    pub const BINARY: u8 = 0x02;
    pub const ISO88591: u8 = 0x03;
    pub const BINARY2: u8 = 0x04;
    pub const JIS: u8 = 0x05;
    pub const ISO88595: u8 = 0x06;
    pub const ISO88598: u8 = 0x07;
    /// UCS-2 (UTF-16-BE on the wire).
    pub const ISO10646: u8 = 0x08;
}

/// Short message content: text to be encoded, or bytes sent as-is.
#[derive(Debug, Clone, Copy)]
pub enum MessageData<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

fn latin1(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(c as u32).ok())
        .collect()
}

fn utf16_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn legacy(text: &str, encoding: &'static encoding_rs::Encoding) -> Option<Vec<u8>> {
    let (encoded, _, had_errors) = encoding.encode(text);
    if had_errors {
        return None;
    }
    Some(encoded.into_owned())
}

/// Convert message content to bytes using the requested data coding.
///
/// Bytes input passes through with the requested coding. Text that the
/// requested coding cannot represent falls back to UCS-2; the returned
/// coding is the one actually used.
pub fn encode_short_message(
    data: MessageData<'_>,
    encoding: u8,
) -> Result<(Vec<u8>, u8), EncodingError> {
    let text = match data {
        MessageData::Bytes(bytes) => return Ok((bytes.to_vec(), encoding)),
        MessageData::Text(text) => text,
    };

    let attempt = match encoding {
        data_coding::DEFAULT => gsm0338::encode(text, gsm0338::ErrorPolicy::Strict).ok(),
        data_coding::ISO88591 => latin1(text),
        data_coding::ISO88595 => legacy(text, encoding_rs::ISO_8859_5),
        data_coding::ISO88598 => legacy(text, encoding_rs::ISO_8859_8),
        data_coding::ISO10646 => Some(utf16_be(text)),
        data_coding::BINARY | data_coding::BINARY2 => {
            return Err(EncodingError::BinaryInput(encoding));
        }
        other => return Err(EncodingError::UnhandledDataCoding(other)),
    };

    match attempt {
        Some(encoded) => Ok((encoded, encoding)),
        // Falling back on UCS-2
        None => Ok((utf16_be(text), data_coding::ISO10646)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pass_through_unchanged() {
        let (data, coding) =
            encode_short_message(MessageData::Bytes(b"\x01\x02\xFF"), data_coding::BINARY)
                .unwrap();
        assert_eq!(data, vec![0x01, 0x02, 0xFF]);
        assert_eq!(coding, data_coding::BINARY);
    }

    #[test]
    fn gsm_text_keeps_requested_coding() {
        let (data, coding) =
            encode_short_message(MessageData::Text("hello"), data_coding::DEFAULT).unwrap();
        assert_eq!(data, b"hello".to_vec());
        assert_eq!(coding, data_coding::DEFAULT);
    }

    #[test]
    fn unencodable_text_falls_back_to_ucs2() {
        let (data, coding) =
            encode_short_message(MessageData::Text("可輸"), data_coding::DEFAULT).unwrap();
        assert_eq!(coding, data_coding::ISO10646);
        assert_eq!(data, vec![0x53, 0xEF, 0x8F, 0xB8]);
    }

    #[test]
    fn latin1_and_cyrillic() {
        let (data, coding) =
            encode_short_message(MessageData::Text("héllo"), data_coding::ISO88591).unwrap();
        assert_eq!(coding, data_coding::ISO88591);
        assert_eq!(data, vec![b'h', 0xE9, b'l', b'l', b'o']);

        let (data, coding) =
            encode_short_message(MessageData::Text("Да"), data_coding::ISO88595).unwrap();
        assert_eq!(coding, data_coding::ISO88595);
        assert_eq!(data, vec![0xB4, 0xD0]);
    }

    #[test]
    fn binary_coding_rejects_text() {
        assert!(matches!(
            encode_short_message(MessageData::Text("x"), data_coding::BINARY),
            Err(EncodingError::BinaryInput(_))
        ));
    }

    #[test]
    fn unhandled_coding_is_an_error() {
        assert!(matches!(
            encode_short_message(MessageData::Text("x"), data_coding::JIS),
            Err(EncodingError::UnhandledDataCoding(0x05))
        ));
    }
}
