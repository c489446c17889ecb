// ── UTF-16 conversion at the FFI edge ─────────────────────────────────────────
//
// Win32 "W" functions take and return NUL-terminated UTF-16.  These helpers
// are pure Rust so they are usable (and tested) on every host.

#![cfg_attr(not(windows), allow(dead_code))]

use crate::error::{Error, Result};

/// Encode `s` as a NUL-terminated UTF-16 buffer.
///
/// Fails if `s` already contains a NUL, which would silently truncate the
/// string on the native side.
pub(crate) fn to_wide(s: &str) -> Result<Vec<u16>> {
    let mut buf: Vec<u16> = s.encode_utf16().collect();
    if let Some(position) = buf.iter().position(|&c| c == 0) {
        return Err(Error::InteriorNul { position });
    }
    buf.push(0);
    Ok(buf)
}

/// Decode a UTF-16 buffer, stopping at the first NUL (or the end of the
/// buffer if there is none).  Unpaired surrogates become U+FFFD.
pub(crate) fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

/// View a UTF-16 buffer as its little-endian byte representation.
pub(crate) fn as_bytes(buf: &[u16]) -> Vec<u8> {
    buf.iter().flat_map(|c| c.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_wide_appends_terminator() {
        assert_eq!(to_wide("ab").unwrap(), vec![0x61, 0x62, 0]);
        assert_eq!(to_wide("").unwrap(), vec![0]);
    }

    #[test]
    fn to_wide_rejects_interior_nul() {
        assert_eq!(
            to_wide("ab\0cd").unwrap_err(),
            Error::InteriorNul { position: 2 }
        );
    }

    #[test]
    fn from_wide_stops_at_first_nul() {
        let buf = [0x68, 0x69, 0, 0x78, 0x79];
        assert_eq!(from_wide(&buf), "hi");
    }

    #[test]
    fn from_wide_without_terminator_uses_whole_buffer() {
        let buf: Vec<u16> = "héllo".encode_utf16().collect();
        assert_eq!(from_wide(&buf), "héllo");
    }

    #[test]
    fn astral_characters_take_two_units() {
        let wide = to_wide("🦀").unwrap();
        assert_eq!(wide.len(), 3);
        assert_eq!(from_wide(&wide), "🦀");
    }

    #[test]
    fn bytes_are_little_endian() {
        assert_eq!(as_bytes(&[0x0041, 0x20AC, 0]), vec![0x41, 0, 0xAC, 0x20, 0, 0]);
    }
}
