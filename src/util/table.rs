//! Precomputed lookup tables for byte-level rank and select.
//!
//! Bits are numbered MSB-first inside a byte: position 0 is `0x80`,
//! position 7 is `0x01`. This matches the layout of [`BitStore`].
//!
//! [`BitStore`]: crate::bits::BitStore

/// Where the ones of each byte sit, MSB-first.
///
/// Row `b` (eight entries starting at `b * 8`) lists the positions of the
/// set bits of `b` in increasing order; the unused tail of a row holds 8.
pub static SELECT_IN_BYTE_TABLE: [u8; 2048] = {
    let mut table = [8u8; 2048];
    let mut byte = 0u16;
    while byte < 256 {
        let mut pos = 0u8;
        let mut count = 0u8;
        while pos < 8 {
            if (byte >> (7 - pos)) & 1 == 1 {
                table[(byte as usize) * 8 + count as usize] = pos;
                count += 1;
            }
            pos += 1;
        }
        byte += 1;
    }
    table
};

/// Position of the one of rank `k` in `byte`, counting from `0x80`.
///
/// 8 means `byte` has at most `k` ones.
#[inline]
pub fn select_in_byte(byte: u8, k: u32) -> u32 {
    if k >= 8 {
        return 8;
    }
    SELECT_IN_BYTE_TABLE[(byte as usize) * 8 + k as usize] as u32
}

/// Mask selecting the leading `n` bits (MSB-first) of a byte, `n` in `0..=8`.
#[inline]
pub fn leading_mask(n: usize) -> u8 {
    match n {
        0 => 0,
        n if n >= 8 => 0xFF,
        _ => !(0xFFu8 >> n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_in_byte_single_bit() {
        for pos in 0..8 {
            let byte = 0x80u8 >> pos;
            assert_eq!(select_in_byte(byte, 0), pos, "byte={:08b}", byte);
            assert_eq!(select_in_byte(byte, 1), 8, "byte={:08b}, k=1", byte);
        }
    }

    #[test]
    fn test_select_in_byte_all_ones() {
        for k in 0..8 {
            assert_eq!(select_in_byte(0xFF, k), k);
        }
        assert_eq!(select_in_byte(0xFF, 8), 8);
    }

    #[test]
    fn test_select_in_byte_zero() {
        assert_eq!(select_in_byte(0, 0), 8);
    }

    #[test]
    fn test_select_in_byte_alternating() {
        // MSB-first positions 0, 2, 4, 6
        let byte = 0b1010_1010;
        assert_eq!(select_in_byte(byte, 0), 0);
        assert_eq!(select_in_byte(byte, 1), 2);
        assert_eq!(select_in_byte(byte, 2), 4);
        assert_eq!(select_in_byte(byte, 3), 6);
        assert_eq!(select_in_byte(byte, 4), 8);
    }

    #[test]
    fn test_table_correctness() {
        for byte in 0u8..=255 {
            let pop = byte.count_ones();
            for k in 0..pop {
                let pos = SELECT_IN_BYTE_TABLE[(byte as usize) * 8 + k as usize];
                assert!(
                    (byte >> (7 - pos)) & 1 == 1,
                    "byte={:08b}, k={}, pos={}",
                    byte,
                    k,
                    pos
                );
                let before = (byte & leading_mask(pos as usize)).count_ones();
                assert_eq!(before, k, "byte={:08b}, k={}", byte, k);
            }
            for k in pop..8 {
                assert_eq!(
                    SELECT_IN_BYTE_TABLE[(byte as usize) * 8 + k as usize],
                    8,
                    "byte={:08b}, k={}",
                    byte,
                    k
                );
            }
        }
    }

    #[test]
    fn test_leading_mask() {
        assert_eq!(leading_mask(0), 0x00);
        assert_eq!(leading_mask(1), 0x80);
        assert_eq!(leading_mask(3), 0xE0);
        assert_eq!(leading_mask(8), 0xFF);
    }
}
