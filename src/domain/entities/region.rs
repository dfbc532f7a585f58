use crate::domain::entities::address::{decode_cell, encode_cell, CellAddress};

/// Inclusive rectangle of cells. `start` is always the top-left corner and
/// `end` the bottom-right one; the constructors never produce an inverted
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl Region {
    /// Rectangle spanning both corners, whatever order they are given in.
    pub fn spanning(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn single(address: CellAddress) -> Self {
        Self {
            start: address,
            end: address,
        }
    }

    /// Smallest region covering `self` and `address`.
    pub fn expanded_to(self, address: CellAddress) -> Self {
        Self {
            start: CellAddress::new(self.start.row.min(address.row), self.start.col.min(address.col)),
            end: CellAddress::new(self.end.row.max(address.row), self.end.col.max(address.col)),
        }
    }

    pub fn contains(&self, address: CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&address.row)
            && (self.start.col..=self.end.col).contains(&address.col)
    }

    pub fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    pub fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// "A1:C10" form; a single cell collapses to "B2".
    pub fn to_range_string(&self) -> String {
        if self.start == self.end {
            encode_cell(self.start)
        } else {
            format!("{}:{}", encode_cell(self.start), encode_cell(self.end))
        }
    }

    pub fn parse(range: &str) -> Option<Self> {
        match range.split_once(':') {
            Some((start, end)) => Some(Self::spanning(decode_cell(start)?, decode_cell(end)?)),
            None => decode_cell(range).map(Self::single),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_range_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_string_uses_a1_corners() {
        let region = Region::spanning(CellAddress::new(0, 0), CellAddress::new(9, 2));
        assert_eq!(region.to_range_string(), "A1:C10");
        assert_eq!(Region::single(CellAddress::new(1, 1)).to_range_string(), "B2");
    }

    #[test]
    fn spanning_normalizes_corner_order() {
        let region = Region::spanning(CellAddress::new(5, 1), CellAddress::new(2, 4));
        assert_eq!(region.start, CellAddress::new(2, 1));
        assert_eq!(region.end, CellAddress::new(5, 4));
        assert_eq!(region.height(), 4);
        assert_eq!(region.width(), 4);
    }

    #[test]
    fn expanded_to_grows_in_every_direction() {
        let region = Region::single(CellAddress::new(3, 3))
            .expanded_to(CellAddress::new(1, 5))
            .expanded_to(CellAddress::new(4, 0));
        assert_eq!(region, Region::spanning(CellAddress::new(1, 0), CellAddress::new(4, 5)));
        assert!(region.contains(CellAddress::new(2, 2)));
        assert!(!region.contains(CellAddress::new(5, 2)));
    }

    #[test]
    fn parse_accepts_ranges_and_single_cells() {
        assert_eq!(
            Region::parse("B2:D4"),
            Some(Region::spanning(CellAddress::new(1, 1), CellAddress::new(3, 3)))
        );
        assert_eq!(Region::parse("C3"), Some(Region::single(CellAddress::new(2, 2))));
        assert_eq!(Region::parse("C3:"), None);
    }
}
