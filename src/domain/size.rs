use std::{fmt, str::FromStr};

use non_empty_string::NonEmptyString;
use once_cell::sync::Lazy;
use regex::Regex;

/// Size prefix grammar: `width/profile`, a construction token, then the rim
/// diameter. Longer tokens are listed first so `RF` and `ZRF` are never
/// mis-read as `R` or `Z` with leftover letters.
static SIZE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)/(\d+)(ZRF|RF|Z|R)(\d+)").expect("valid regex"));

/// The construction token separating profile from rim diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construction {
    /// Standard radial (`R`).
    Radial,
    /// Run-flat radial (`RF`).
    RunFlat,
    /// Z-rated radial (`Z`).
    ZRated,
    /// Z-rated run-flat (`ZRF`).
    ZRatedRunFlat,
}

impl Construction {
    /// Returns the sidewall token for this construction.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Radial => "R",
            Self::RunFlat => "RF",
            Self::ZRated => "Z",
            Self::ZRatedRunFlat => "ZRF",
        }
    }
}

impl FromStr for Construction {
    type Err = InvalidConstruction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Self::Radial),
            "RF" => Ok(Self::RunFlat),
            "Z" => Ok(Self::ZRated),
            "ZRF" => Ok(Self::ZRatedRunFlat),
            _ => Err(InvalidConstruction(s.to_string())),
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Error returned when a token is not a recognised construction marking.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid construction token '{0}': expected R, RF, Z or ZRF")]
pub struct InvalidConstruction(String);

/// A tyre size marking: section width, aspect-ratio profile, and rim
/// diameter.
///
/// Parsed from the mandatory prefix of a catalogue description, e.g.
/// `225/45R17` (width 225 mm, profile 45 %, 17 in rim). The numeric
/// components are kept as the digit strings that appeared in the
/// description and are non-empty by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyreSize {
    width: NonEmptyString,
    profile: NonEmptyString,
    diameter: NonEmptyString,
    construction: Construction,
}

impl TyreSize {
    /// Creates a size from pre-split components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Component`] if any numeric component is empty or
    /// contains a non-digit character.
    pub fn new(
        width: String,
        profile: String,
        diameter: String,
        construction: Construction,
    ) -> Result<Self, Error> {
        Ok(Self {
            width: digit_component(width)?,
            profile: digit_component(profile)?,
            diameter: digit_component(diameter)?,
            construction,
        })
    }

    /// Returns the section width digits.
    #[must_use]
    pub fn width(&self) -> &str {
        self.width.as_str()
    }

    /// Returns the aspect-ratio profile digits.
    #[must_use]
    pub fn profile(&self) -> &str {
        self.profile.as_str()
    }

    /// Returns the rim diameter digits.
    #[must_use]
    pub fn diameter(&self) -> &str {
        self.diameter.as_str()
    }

    /// Returns the construction marking.
    #[must_use]
    pub const fn construction(&self) -> Construction {
        self.construction
    }

    /// Parses a size from the very start of free-form text, returning the
    /// size and the unconsumed remainder.
    ///
    /// The prefix must begin at the first byte; leading whitespace is not
    /// skipped.
    pub(crate) fn parse_prefix(text: &str) -> Option<(Self, &str)> {
        let caps = SIZE_PREFIX.captures(text)?;
        let matched = caps.get(0)?;
        let construction = caps[3].parse().ok()?;
        let size = Self::new(
            caps[1].to_string(),
            caps[2].to_string(),
            caps[4].to_string(),
            construction,
        )
        .ok()?;
        Some((size, &text[matched.end()..]))
    }
}

impl FromStr for TyreSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_prefix(s) {
            Some((size, rest)) if rest.is_empty() => Ok(size),
            _ => Err(Error::Syntax(s.to_string())),
        }
    }
}

impl fmt::Display for TyreSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}{}{}",
            self.width, self.profile, self.construction, self.diameter
        )
    }
}

fn digit_component(value: String) -> Result<NonEmptyString, Error> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Component(value));
    }
    NonEmptyString::new(value.clone()).map_err(|_| Error::Component(value))
}

/// Errors that can occur when constructing or parsing a tyre size.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The text does not match the size grammar.
    #[error("Invalid tyre size '{0}': expected width/profile, a construction token and a rim diameter, e.g. 225/45R17")]
    Syntax(String),

    /// A numeric component is empty or non-numeric.
    #[error("Invalid size component '{0}': expected one or more digits")]
    Component(String),
}
