//! Byte-to-text decoding for classification

use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
const UTF32_LE_BOM: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
const UTF32_BE_BOM: &[u8] = &[0x00, 0x00, 0xFE, 0xFF];

/// Decode document bytes into text.
///
/// Honors UTF-8, UTF-16 and UTF-32 byte order marks and falls back to lossy UTF-8.
/// Never fails; undecodable sequences become U+FFFD.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8_lossy(rest);
    }
    // UTF-32 LE shares its first two bytes with the UTF-16 LE mark
    if let Some(rest) = bytes.strip_prefix(UTF32_LE_BOM) {
        return Cow::Owned(decode_utf32(rest, u32::from_le_bytes));
    }
    if let Some(rest) = bytes.strip_prefix(UTF32_BE_BOM) {
        return Cow::Owned(decode_utf32(rest, u32::from_be_bytes));
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
        return Cow::Owned(decode_utf16(rest, u16::from_le_bytes));
    }
    if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
        return Cow::Owned(decode_utf16(rest, u16::from_be_bytes));
    }
    String::from_utf8_lossy(bytes)
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    // Odd trailing byte
    if bytes.len() % 2 == 1 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}

fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> String {
    let mut text: String = bytes
        .chunks_exact(4)
        .map(|q| {
            char::from_u32(unit([q[0], q[1], q[2], q[3]])).unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect();
    if bytes.len() % 4 != 0 {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
