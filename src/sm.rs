//! Short message segmentation.
//!
//! Messages longer than a single PDU allows are split into parts carried as
//! separate submit_sm operations, tied together by a concatenation UDH at
//! the front of each part.

use crate::encoding::{MessageData, data_coding, encode_short_message};
use crate::error::EncodingError;

/// Result of [`split_short_message`]: the esm_class and data_coding to
/// submit with, plus one entry per message part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitMessage {
    pub esm_class: u8,
    pub data_coding: u8,
    pub parts: Vec<Vec<u8>>,
}

/// Encode message content and split it into parts if necessary.
///
/// Single-part messages come back untouched with esm_class 0x00. Longer
/// messages are split into chunks sized for the coding, esm_class is set to
/// 0x40 (UDH present) and every part is prefixed with a concatenation UDH
/// `05 00 03 <ref> <total> <index>` sharing one random reference byte.
/// Each part is submitted to the SMSC as its own short message.
pub fn split_short_message(
    data: MessageData<'_>,
    encoding: u8,
) -> Result<SplitMessage, EncodingError> {
    let (data, encoding) = encode_short_message(data, encoding)?;

    let (max_len, chunk_size) = match encoding {
        data_coding::DEFAULT => (160, 153),
        data_coding::BINARY | data_coding::BINARY2 => (70, 67),
        _ => (140, 134),
    };

    if data.len() <= max_len {
        return Ok(SplitMessage {
            esm_class: 0x00,
            data_coding: encoding,
            parts: vec![data],
        });
    }

    let chunks: Vec<&[u8]> = data.chunks(chunk_size).collect();
    let reference: u8 = rand::random();
    let total = chunks.len() as u8;

    let parts = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            let mut part = Vec::with_capacity(6 + chunk.len());
            part.extend_from_slice(&[0x05, 0x00, 0x03, reference, total, index as u8 + 1]);
            part.extend_from_slice(chunk);
            part
        })
        .collect();

    Ok(SplitMessage {
        esm_class: 0x40,
        data_coding: encoding,
        parts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_a_single_bare_part() {
        let split =
            split_short_message(MessageData::Text("short and sweet"), data_coding::DEFAULT)
                .unwrap();
        assert_eq!(split.esm_class, 0x00);
        assert_eq!(split.data_coding, data_coding::DEFAULT);
        assert_eq!(split.parts, vec![b"short and sweet".to_vec()]);
    }

    #[test]
    fn long_ascii_splits_with_concatenation_udh() {
        let text = "a".repeat(203);
        let split = split_short_message(MessageData::Text(&text), data_coding::DEFAULT).unwrap();
        assert_eq!(split.esm_class, 0x40);
        assert_eq!(split.data_coding, data_coding::DEFAULT);
        assert_eq!(split.parts.len(), 2);

        let reference = split.parts[0][3];
        for (i, part) in split.parts.iter().enumerate() {
            assert_eq!(&part[..3], &[0x05, 0x00, 0x03]);
            assert_eq!(part[3], reference);
            assert_eq!(part[4], 2);
            assert_eq!(part[5], i as u8 + 1);
        }
        assert_eq!(split.parts[0].len(), 6 + 153);
        assert_eq!(split.parts[1].len(), 6 + 50);
    }

    #[test]
    fn unicode_text_falls_back_to_ucs2_single_part() {
        let split =
            split_short_message(MessageData::Text("可輸入英文單字"), data_coding::DEFAULT)
                .unwrap();
        assert_eq!(split.esm_class, 0x00);
        assert_eq!(split.data_coding, data_coding::ISO10646);
        assert_eq!(split.parts.len(), 1);
        // 7 characters in UTF-16-BE, no UDH
        assert_eq!(split.parts[0].len(), 14);
    }

    #[test]
    fn long_ucs2_uses_the_smaller_chunk_size() {
        // 100 CJK characters = 200 UCS-2 bytes, above the 140 byte limit
        let text: String = std::iter::repeat('字').take(100).collect();
        let split = split_short_message(MessageData::Text(&text), data_coding::DEFAULT).unwrap();
        assert_eq!(split.data_coding, data_coding::ISO10646);
        assert_eq!(split.esm_class, 0x40);
        assert_eq!(split.parts.len(), 2);
        assert_eq!(split.parts[0].len(), 6 + 134);
        assert_eq!(split.parts[1].len(), 6 + 66);
    }

    #[test]
    fn binary_data_splits_on_the_binary_limits() {
        let payload = vec![0xAA; 140];
        let split =
            split_short_message(MessageData::Bytes(&payload), data_coding::BINARY).unwrap();
        assert_eq!(split.esm_class, 0x40);
        assert_eq!(split.parts.len(), 3);
        assert_eq!(split.parts[0].len(), 6 + 67);
        assert_eq!(split.parts[2].len(), 6 + 6);
        // All parts share the reference byte
        let reference = split.parts[0][3];
        assert!(split.parts.iter().all(|p| p[3] == reference));
        assert!(split.parts.iter().all(|p| p[4] == 3));
    }
}
