//! Typography and page layout directives.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::ConfigurationError;

/// A font size in points. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FontSize(u32);

impl FontSize {
    /// Creates a font size from a user-supplied integer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidFontSize` for zero, negative, or
    /// out-of-range values.
    pub fn new(points: i64) -> Result<Self, ConfigurationError> {
        if points <= 0 {
            return Err(ConfigurationError::InvalidFontSize(points));
        }
        u32::try_from(points)
            .map(Self)
            .map_err(|_| ConfigurationError::InvalidFontSize(points))
    }

    pub fn points(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

/// Paper size for paginated output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Returns the converter's paper size name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSize {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            _ => Err(ConfigurationError::UnsupportedPage(s.trim().to_string())),
        }
    }
}

/// Line spacing multiplier (1.0 = single spacing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LineHeight(f64);

impl LineHeight {
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidLineHeight` unless the value is
    /// finite and greater than zero.
    pub fn new(value: f64) -> Result<Self, ConfigurationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ConfigurationError::InvalidLineHeight(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for LineHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestField;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_size_accepts_positive_values() {
        let size = FontSize::new(13).unwrap();
        assert_eq!(size.points(), 13);
        assert_eq!(size.to_string(), "13pt");
    }

    #[test]
    fn font_size_rejects_zero_and_negative() {
        for value in [0, -1, -13] {
            let err = FontSize::new(value).unwrap_err();
            assert_eq!(err.field(), RequestField::FontSize);
        }
    }

    #[test]
    fn font_size_rejects_values_beyond_u32() {
        assert!(FontSize::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn page_size_parses_case_insensitively() {
        assert_eq!("A4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("Letter".parse::<PageSize>().unwrap(), PageSize::Letter);
    }

    #[test]
    fn unknown_page_size_is_rejected() {
        let err = "legal".parse::<PageSize>().unwrap_err();
        assert_eq!(err.field(), RequestField::Page);
    }

    #[test]
    fn line_height_must_be_positive_and_finite() {
        assert_eq!(LineHeight::new(1.4).unwrap().to_string(), "1.4");
        assert!(LineHeight::new(0.0).is_err());
        assert!(LineHeight::new(-1.0).is_err());
        assert!(LineHeight::new(f64::NAN).is_err());
        assert!(LineHeight::new(f64::INFINITY).is_err());
    }
}
