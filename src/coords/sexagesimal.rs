//! Sexagesimal Angle Parsing
//! Reads "a b c" triples such as right ascension hours or declination degrees.

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordError {
    #[error("expected three whitespace-separated values, found {found} in {text:?}")]
    TokenCount { text: String, found: usize },
    #[error("{token:?} is not a number")]
    NotANumber { token: String },
}

/// A signed value written as three sexagesimal parts (unit, 1/60, 1/3600).
///
/// The sign comes from the first token only, so `"-0 30 0"` is -0.5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub whole: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Parse exactly three whitespace-separated numeric tokens.
    pub fn parse(text: &str) -> Result<Self, CoordError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(CoordError::TokenCount {
                text: text.to_string(),
                found: tokens.len(),
            });
        }

        let whole = Self::number(tokens[0])?;
        let minutes = Self::number(tokens[1])?;
        let seconds = Self::number(tokens[2])?;

        Ok(Self {
            negative: tokens[0].starts_with('-'),
            whole: whole.abs(),
            minutes,
            seconds,
        })
    }

    fn number(token: &str) -> Result<f64, CoordError> {
        token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CoordError::NotANumber {
                token: token.to_string(),
            })
    }

    /// Decimal value in the unit of the first token.
    pub fn value(&self) -> f64 {
        let magnitude = self.whole + self.minutes / 60.0 + self.seconds / 3600.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl FromStr for Sexagesimal {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Right ascension in hours, minutes, seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightAscension(pub Sexagesimal);

impl RightAscension {
    pub fn parse(text: &str) -> Result<Self, CoordError> {
        Sexagesimal::parse(text).map(Self)
    }

    pub fn hours(&self) -> f64 {
        self.0.value()
    }

    /// 15 degrees per hour.
    pub fn degrees(&self) -> f64 {
        15.0 * self.hours()
    }
}

/// Declination in degrees, arcminutes, arcseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declination(pub Sexagesimal);

impl Declination {
    pub fn parse(text: &str) -> Result<Self, CoordError> {
        Sexagesimal::parse(text).map(Self)
    }

    pub fn degrees(&self) -> f64 {
        self.0.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn parses_three_tokens() {
        let s = Sexagesimal::parse("5 35 17.3").unwrap();
        assert!(close(s.value(), 5.0 + 35.0 / 60.0 + 17.3 / 3600.0));
    }

    #[test]
    fn extra_whitespace_is_ignored() {
        let s: Sexagesimal = "  1\t30   0 ".parse().unwrap();
        assert!(close(s.value(), 1.5));
    }

    #[test]
    fn negative_degree_term_signs_whole_value() {
        let dec = Declination::parse("-45 30 0").unwrap();
        assert!(close(dec.degrees(), -45.5));
    }

    #[test]
    fn negative_zero_keeps_sign() {
        let dec = Declination::parse("-0 30 0").unwrap();
        assert!(close(dec.degrees(), -0.5));
    }

    #[test]
    fn right_ascension_scales_to_degrees() {
        let ra = RightAscension::parse("6 0 0").unwrap();
        assert!(close(ra.degrees(), 90.0));
    }

    #[test]
    fn wrong_token_count_is_rejected() {
        assert_eq!(
            Sexagesimal::parse("12 30"),
            Err(CoordError::TokenCount {
                text: "12 30".to_string(),
                found: 2
            })
        );
        assert!(Sexagesimal::parse("1 2 3 4").is_err());
        assert!(Sexagesimal::parse("").is_err());
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        assert_eq!(
            Sexagesimal::parse("12 xx 0"),
            Err(CoordError::NotANumber {
                token: "xx".to_string()
            })
        );
        assert!(Sexagesimal::parse("NaN 0 0").is_err());
        assert!(Sexagesimal::parse("inf 0 0").is_err());
    }
}
