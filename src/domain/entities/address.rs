/// Keys in a sparse cell map that start with this prefix carry sheet metadata
/// (declared dimension, merges, ...) and never address a cell.
pub const METADATA_PREFIX: char = '!';

/// Metadata key holding the dimension a sheet declares for itself.
pub const DIMENSION_KEY: &str = "!ref";

pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// Zero-based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", encode_cell(*self))
    }
}

/// Column index to letters: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn encode_col(col: u32) -> String {
    let mut column = col as u64 + 1;
    let mut letters = Vec::new();
    while column > 0 {
        column -= 1;
        letters.push(b'A' + (column % 26) as u8);
        column /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

pub fn encode_cell(address: CellAddress) -> String {
    format!("{}{}", encode_col(address.col), address.row as u64 + 1)
}

/// Parses an A1-style reference ("B7" -> row 6, col 1). Letters are
/// case-insensitive. Returns `None` for anything that is not letters followed
/// by a positive row number.
pub fn decode_cell(reference: &str) -> Option<CellAddress> {
    let split = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut col: u32 = 0;
    for letter in letters.bytes() {
        let value = (letter.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(value)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some(CellAddress::new(row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_col_rolls_over_after_z() {
        assert_eq!(encode_col(0), "A");
        assert_eq!(encode_col(25), "Z");
        assert_eq!(encode_col(26), "AA");
        assert_eq!(encode_col(701), "ZZ");
        assert_eq!(encode_col(702), "AAA");
    }

    #[test]
    fn decode_cell_reads_a1_references() {
        assert_eq!(decode_cell("A1"), Some(CellAddress::new(0, 0)));
        assert_eq!(decode_cell("B7"), Some(CellAddress::new(6, 1)));
        assert_eq!(decode_cell("aa10"), Some(CellAddress::new(9, 26)));
    }

    #[test]
    fn decode_cell_rejects_malformed_references() {
        for reference in ["", "A", "7", "A0", "!ref", "A1B", "1A"] {
            assert_eq!(decode_cell(reference), None, "{reference:?} should not decode");
        }
    }

    #[test]
    fn encode_and_decode_agree() {
        let address = CellAddress::new(41, 730);
        assert_eq!(decode_cell(&encode_cell(address)), Some(address));
    }

    #[test]
    fn metadata_keys_use_bang_prefix() {
        assert!(is_metadata_key("!ref"));
        assert!(is_metadata_key("!merges"));
        assert!(!is_metadata_key("A1"));
    }
}
