use std::collections::HashMap;

/// Raw value of a spreadsheet cell as handed over by a decoder.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No cell at this position (a hole in a sparse row).
    #[default]
    Absent,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Anything else the decoder could only describe as text (error codes,
    /// dates, metadata payloads).
    Other(String),
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.is_empty())
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Absent => Ok(()),
            CellValue::Text(v) | CellValue::Other(v) => f.write_str(v),
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Float(v) => write_number(f, *v),
            CellValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Plain decimal between these magnitudes, exponent notation outside.
const DECIMAL_RANGE: std::ops::Range<f64> = 1e-6..1e21;

/// Shortest round-trip form of `value` in the usual spreadsheet/script
/// notation: `Infinity`, a single `0` for both zeros, and `1e+21` / `1e-7`
/// style exponents.
fn write_number(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_infinite() {
        return f.write_str(if value.is_sign_positive() { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return f.write_str("0");
    }
    if value.is_nan() || DECIMAL_RANGE.contains(&value.abs()) {
        return write!(f, "{value}");
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&exponential),
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Populated cells keyed by A1 address, plus metadata entries whose keys
/// start with [`METADATA_PREFIX`](crate::domain::entities::address::METADATA_PREFIX).
pub type CellMap = HashMap<String, CellValue>;

pub type RawRow = Vec<CellValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_plain_string_conversion() {
        assert_eq!(CellValue::from("abc").to_string(), "abc");
        assert_eq!(CellValue::from(10_i64).to_string(), "10");
        assert_eq!(CellValue::from(10.0).to_string(), "10");
        assert_eq!(CellValue::from(12.5).to_string(), "12.5");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(CellValue::Absent.to_string(), "");
    }

    #[test]
    fn floats_switch_to_exponents_outside_decimal_range() {
        assert_eq!(CellValue::from(1e21).to_string(), "1e+21");
        assert_eq!(CellValue::from(1.5e300).to_string(), "1.5e+300");
        assert_eq!(CellValue::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(CellValue::from(1e-7).to_string(), "1e-7");
        assert_eq!(CellValue::from(-2.5e-9).to_string(), "-2.5e-9");
        assert_eq!(CellValue::from(1e-6).to_string(), "0.000001");
        assert_eq!(CellValue::from(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn zeros_and_nan_print_plainly() {
        assert_eq!(CellValue::from(-0.0).to_string(), "0");
        assert_eq!(CellValue::from(0.0).to_string(), "0");
        assert_eq!(CellValue::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn only_text_can_be_empty_text() {
        assert!(CellValue::from("").is_empty_text());
        assert!(!CellValue::Absent.is_empty_text());
        assert!(!CellValue::Other(String::new()).is_empty_text());
    }
}
