use thiserror::Error;

/// Fixed header every base EDID block starts with.
pub const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

/// Byte offset of the 4-byte little-endian serial number.
const SERIAL_OFFSET: usize = 12;

/// Error type for EDID decoding
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EdidError {
    #[error("EDID block does not start with the fixed header")]
    InvalidHeader,
    #[error("EDID block too short: {len} bytes, need at least 16")]
    Truncated { len: usize },
    #[error("invalid hex digit {0:?} in EDID text")]
    InvalidHexDigit(char),
    #[error("EDID hex text has odd length {0}")]
    OddHexLength(usize),
}

/// Extracts the manufacturer-assigned serial number from a raw EDID block.
///
/// Validates the fixed 8-byte header and a minimum length of 16 bytes, then
/// reads the serial from bytes 12..16 as a little-endian `u32`.
pub fn decode_serial(block: &[u8]) -> Result<u32, EdidError> {
    if block.len() < SERIAL_OFFSET + 4 {
        return Err(EdidError::Truncated { len: block.len() });
    }
    if block[..EDID_HEADER.len()] != EDID_HEADER {
        return Err(EdidError::InvalidHeader);
    }
    let mut bytes = [0; 4];
    bytes.copy_from_slice(&block[SERIAL_OFFSET..SERIAL_OFFSET + 4]);
    Ok(u32::from_le_bytes(bytes))
}

/// Decodes the hex text accumulated from an `xrandr --properties` EDID
/// property into raw bytes.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, EdidError> {
    if text.len() % 2 != 0 {
        return Err(EdidError::OddHexLength(text.len()));
    }
    let digit = |c: char| {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or(EdidError::InvalidHexDigit(c))
    };
    let mut chars = text.chars();
    let mut bytes = Vec::with_capacity(text.len() / 2);
    while let (Some(hi), Some(lo)) = (chars.next(), chars.next()) {
        bytes.push(digit(hi)? << 4 | digit(lo)?);
    }
    Ok(bytes)
}
