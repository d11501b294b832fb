//! Bit-order reversal with complement.
//!
//! Each byte is mirrored (bit 0 becomes bit 7 and so on) and then inverted.
//! The transform is its own inverse, so the same call both obfuscates and
//! restores a field.

use crate::error::{Error, Result};

/// Length of the obfuscated leading field of a handshake frame.
pub const OBFUSCATED_FIELD_LEN: usize = 4;

/// Precomputed `reverse_byte` for every byte value.
pub const REVERSE_TABLE: [u8; 256] = build_reverse_table();

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = !(i as u8).reverse_bits();
        i += 1;
    }
    table
}

/// Reverse the bit order of `x` and complement the result.
#[inline]
pub fn reverse_byte(x: u8) -> u8 {
    REVERSE_TABLE[x as usize]
}

/// Apply [`reverse_byte`] to every byte of `data` in place.
#[inline]
pub fn reverse_in_place(data: &mut [u8]) {
    for b in data.iter_mut() {
        *b = REVERSE_TABLE[*b as usize];
    }
}

/// Obfuscate the first `count` bytes of `data` in place.
///
/// Running it twice over the same bytes restores them. Fails without
/// touching `data` when it holds fewer than `count` bytes.
pub fn obfuscate_header(data: &mut [u8], count: usize) -> Result<()> {
    if data.len() < count {
        return Err(Error::too_short(count, data.len()));
    }
    reverse_in_place(&mut data[..count]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Straightforward shift loop, kept as the reference for the table.
    fn reverse_byte_loop(mut base: u8) -> u8 {
        let mut result = 0u8;
        for _ in 0..8 {
            result <<= 1;
            result |= base & 0x01;
            base >>= 1;
        }
        !result
    }

    #[test]
    fn test_table_matches_shift_loop() {
        for x in 0..=255u8 {
            assert_eq!(reverse_byte(x), reverse_byte_loop(x), "byte {x:#04x}");
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(reverse_byte(0x00), 0xFF);
        assert_eq!(reverse_byte(0xFF), 0x00);
        assert_eq!(reverse_byte(0x01), 0x7F);
        assert_eq!(reverse_byte(0x80), 0xFE);
        assert_eq!(reverse_byte(0x13), 0x37);
        assert_eq!(reverse_byte(0x11), 0x77);
    }

    #[test]
    fn test_involution() {
        for x in 0..=255u8 {
            assert_eq!(reverse_byte(reverse_byte(x)), x);
        }
    }

    #[test]
    fn test_obfuscate_header_zeros() {
        let mut data = [0u8; 4];
        obfuscate_header(&mut data, OBFUSCATED_FIELD_LEN).unwrap();
        assert_eq!(data, [0xFF; 4]);

        obfuscate_header(&mut data, OBFUSCATED_FIELD_LEN).unwrap();
        assert_eq!(data, [0x00; 4]);
    }

    #[test]
    fn test_obfuscate_header_leaves_tail() {
        let mut data = [0x5Au8; 8];
        obfuscate_header(&mut data, OBFUSCATED_FIELD_LEN).unwrap();
        assert_eq!(&data[..4], &[reverse_byte(0x5A); 4]);
        assert_eq!(&data[4..], &[0x5A; 4]);
    }

    #[test]
    fn test_obfuscate_header_too_short() {
        let mut data = [0x12u8, 0x34, 0x56];
        let err = obfuscate_header(&mut data, OBFUSCATED_FIELD_LEN).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooShort {
                needed: 4,
                actual: 3
            }
        ));
        assert_eq!(data, [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_obfuscate_header_zero_count() {
        let mut data: [u8; 0] = [];
        assert!(obfuscate_header(&mut data, 0).is_ok());
    }
}
