//! Alphabetic column codec
//!
//! Spreadsheet column labels are a bijective base-26 numeral system: the
//! digits A-Z stand for 1-26 and there is no zero digit, so index 25 is "Z"
//! and index 26 is "AA". Indices are zero-based internally.

use crate::error::{Error, Result};

/// Convert a zero-based column index to letters (0 = A, 25 = Z, 26 = AA, ...)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to a zero-based index (A = 0, Z = 25, AA = 26, ...)
///
/// Lowercase input is accepted and treated as uppercase. Labels whose index
/// does not fit in `u32` are invalid.
///
/// # Examples
/// ```
/// use sheetlink_core::column::letters_to_column;
///
/// assert_eq!(letters_to_column("A").unwrap(), 0);
/// assert_eq!(letters_to_column("AA").unwrap(), 26);
/// ```
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::InvalidColumnLabel(letters.to_string()));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidColumnLabel(letters.to_string()));
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| Error::InvalidColumnLabel(letters.to_string()))?;
    }

    Ok(col - 1) // Convert to 0-based
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(36), "AK");
        assert_eq!(column_to_letters(51), "AZ");
        assert_eq!(column_to_letters(52), "BA");
        assert_eq!(column_to_letters(676), "ZA");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("B").unwrap(), 1);
        assert_eq!(letters_to_column("K").unwrap(), 10);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("AB").unwrap(), 27);
        assert_eq!(letters_to_column("AK").unwrap(), 36);
        assert_eq!(letters_to_column("AZ").unwrap(), 51);
        assert_eq!(letters_to_column("BA").unwrap(), 52);
        assert_eq!(letters_to_column("ZA").unwrap(), 676);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aa").unwrap(), 26);
    }

    #[test]
    fn test_letters_to_column_errors() {
        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
        assert!(letters_to_column("$A").is_err());
        assert!(letters_to_column("A B").is_err());
    }

    #[test]
    fn test_letters_to_column_rejects_oversized_labels() {
        // "MWLQKWU" is the last label whose index fits in u32
        assert_eq!(letters_to_column("MWLQKWU").unwrap(), u32::MAX - 1);
        assert!(letters_to_column("MWLQKWV").is_err());
        assert!(letters_to_column("AAAAAAAA").is_err());
        assert!(letters_to_column("ZZZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_round_trip_a_through_zzz() {
        // "A" is 0 and "ZZZ" is 18277
        for idx in 0..=18277 {
            assert_eq!(letters_to_column(&column_to_letters(idx)).unwrap(), idx);
        }
    }
}
