//! Character codes: 8-bit ASCII and the 5-bit capital-letter code.
//!
//! The letter code maps `A..=Z` to `0..=25`; input letters are case-folded
//! to upper case before encoding.

use crate::bits::{BitSequence, BitStore};
use crate::codec::numeric::{read_u64, write_u64};
use crate::error::{BitError, Result};

const ASCII_BITS: usize = 8;
const LETTER_BITS: usize = 5;
const LETTERS: u64 = 26;

impl BitSequence {
    /// 8-bit ASCII code of `c`.
    pub fn from_char(c: char) -> Result<Self> {
        if !c.is_ascii() {
            return Err(BitError::invalid(format!("{:?} is not ASCII", c)));
        }
        Self::from_u64(c as u64, ASCII_BITS)
    }

    /// Decode an 8-bit ASCII code.
    pub fn char_value(&self) -> Result<char> {
        let logical = self.logical();
        if logical.len() != ASCII_BITS {
            return Err(BitError::invalid(format!(
                "an ASCII code has {} bits, got {}",
                ASCII_BITS,
                logical.len()
            )));
        }
        let code = read_u64(&logical, 0, ASCII_BITS) as u8;
        if !code.is_ascii() {
            return Err(BitError::invalid(format!("{:#04x} is not ASCII", code)));
        }
        Ok(code as char)
    }

    /// 5-bit letter code of `c` (case-insensitive).
    pub fn from_letter(c: char) -> Result<Self> {
        Self::from_u64(letter_code(c)?, LETTER_BITS)
    }

    /// Decode a 5-bit letter code; codes above 25 fail.
    pub fn letter_value(&self) -> Result<char> {
        let logical = self.logical();
        if logical.len() != LETTER_BITS {
            return Err(BitError::invalid(format!(
                "a letter code has {} bits, got {}",
                LETTER_BITS,
                logical.len()
            )));
        }
        letter(read_u64(&logical, 0, LETTER_BITS))
    }

    /// Consecutive 5-bit letter codes of a non-empty word.
    pub fn from_letters(word: &str) -> Result<Self> {
        let count = word.chars().count();
        let mut store = BitStore::zeros(count * LETTER_BITS)?;
        for (i, c) in word.chars().enumerate() {
            let first = i * LETTER_BITS;
            write_u64(&mut store, first, first + LETTER_BITS, letter_code(c)?);
        }
        Ok(Self::from_store(store))
    }

    /// Decode consecutive 5-bit letter codes.
    pub fn letters_value(&self) -> Result<String> {
        let logical = self.logical();
        if logical.len() % LETTER_BITS != 0 {
            return Err(BitError::invalid(format!(
                "{} bits is not a whole number of letter codes",
                logical.len()
            )));
        }
        (0..logical.len() / LETTER_BITS)
            .map(|i| {
                let first = i * LETTER_BITS;
                letter(read_u64(&logical, first, first + LETTER_BITS))
            })
            .collect()
    }
}

fn letter_code(c: char) -> Result<u64> {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Ok(u64::from(upper as u8 - b'A'))
    } else {
        Err(BitError::invalid(format!("{:?} is not a letter", c)))
    }
}

fn letter(code: u64) -> Result<char> {
    if code < LETTERS {
        Ok((b'A' + code as u8) as char)
    } else {
        Err(BitError::invalid(format!(
            "letter code {} is outside 0..=25",
            code
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        let a = BitSequence::from_char('a').unwrap();
        assert_eq!(a, "01100001".parse().unwrap());
        assert_eq!(a.char_value().unwrap(), 'a');
        assert!(BitSequence::from_char('é').is_err());
        let high: BitSequence = "10000000".parse().unwrap();
        assert!(high.char_value().is_err());
        let short: BitSequence = "0110".parse().unwrap();
        assert!(short.char_value().is_err());
    }

    #[test]
    fn test_letter_code() {
        let z = BitSequence::from_letter('z').unwrap();
        assert_eq!(z, "11001".parse().unwrap());
        assert_eq!(z.letter_value().unwrap(), 'Z');
        assert_eq!(
            BitSequence::from_letter('A').unwrap().letter_value().unwrap(),
            'A'
        );
        assert!(BitSequence::from_letter('3').is_err());

        let out_of_range: BitSequence = "11010".parse().unwrap();
        assert!(out_of_range.letter_value().is_err());
    }

    #[test]
    fn test_letter_words() {
        let word = BitSequence::from_letters("Heap").unwrap();
        assert_eq!(word.number_of_bits(), 20);
        assert_eq!(word.letters_value().unwrap(), "HEAP");
        assert!(BitSequence::from_letters("").is_err());
        let ragged: BitSequence = "110".parse().unwrap();
        assert!(ragged.letters_value().is_err());
    }
}
