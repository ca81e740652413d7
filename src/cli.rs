//! Argument-parsing helpers shared by the seven binaries.
//!
//! clap validators want `Fn(String) -> Result<(), String>` closures;
//! the `validate_*` functions here are the bodies those closures
//! delegate to, and the `parse_*` functions re-read the values after
//! clap has accepted them.

use num::Complex;
use std::str::FromStr;

/// Given a string and a separator, returns the two values separated by
/// the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

/// A specific implementation of parse_pair using an 'x' and expecting
/// pixel dimensions.
pub fn parse_size(s: &str) -> Option<(usize, usize)> {
    parse_pair(s, 'x')
}

/// Validator body for pair-valued options.
pub fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

/// Validator body for single numeric options with an inclusive range.
/// PartialOrd rather than Ord so float options can use it too.
pub fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_parse_and_reject() {
        assert_eq!(parse_pair::<usize>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<usize>("800x", 'x'), None);
        assert_eq!(parse_pair::<usize>("800", 'x'), None);
        assert_eq!(parse_complex("-1.25,0.5"), Some(Complex::new(-1.25, 0.5)));
        assert_eq!(parse_complex("-1.25 0.5"), None);
    }

    #[test]
    fn range_validation_covers_floats() {
        assert!(validate_range::<f64>("2.0", 0.1, 8.0, "nan", "range").is_ok());
        assert_eq!(
            validate_range::<f64>("9.5", 0.1, 8.0, "nan", "range"),
            Err("range".to_string())
        );
        assert_eq!(
            validate_range::<f64>("wide", 0.1, 8.0, "nan", "range"),
            Err("nan".to_string())
        );
    }
}
