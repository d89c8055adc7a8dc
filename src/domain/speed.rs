use std::{fmt, str::FromStr};

/// A tyre speed-rating code.
///
/// Speed ratings are single uppercase letters stamped after the load index
/// on a tyre sidewall. The variants are ordered from lowest to highest rated
/// speed, matching the sidewall alphabet (note that `H` sits between `U` and
/// `V` rather than in alphabetical position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedRating {
    /// Rated to 140 km/h.
    N,
    /// Rated to 150 km/h.
    P,
    /// Rated to 160 km/h.
    Q,
    /// Rated to 170 km/h.
    R,
    /// Rated to 180 km/h.
    S,
    /// Rated to 190 km/h.
    T,
    /// Rated to 200 km/h.
    U,
    /// Rated to 210 km/h.
    H,
    /// Rated to 240 km/h.
    V,
    /// Rated above 240 km/h.
    Z,
    /// Rated to 270 km/h.
    W,
    /// Rated to 300 km/h.
    Y,
}

impl SpeedRating {
    /// Every valid rating, in sidewall order.
    pub const ALL: [Self; 12] = [
        Self::N,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::H,
        Self::V,
        Self::Z,
        Self::W,
        Self::Y,
    ];

    /// Returns the sidewall letter for this rating.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::N => 'N',
            Self::P => 'P',
            Self::Q => 'Q',
            Self::R => 'R',
            Self::S => 'S',
            Self::T => 'T',
            Self::U => 'U',
            Self::H => 'H',
            Self::V => 'V',
            Self::Z => 'Z',
            Self::W => 'W',
            Self::Y => 'Y',
        }
    }

    /// Returns the leftmost valid rating letter appearing anywhere in `text`.
    ///
    /// Used as a recovery step when a load index is adjacent to a letter that
    /// is not itself a valid rating. Matching is case-sensitive: only
    /// uppercase letters count.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        text.chars().find_map(|c| Self::try_from(c).ok())
    }
}

impl TryFrom<char> for SpeedRating {
    type Error = InvalidSpeedRating;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'N' => Ok(Self::N),
            'P' => Ok(Self::P),
            'Q' => Ok(Self::Q),
            'R' => Ok(Self::R),
            'S' => Ok(Self::S),
            'T' => Ok(Self::T),
            'U' => Ok(Self::U),
            'H' => Ok(Self::H),
            'V' => Ok(Self::V),
            'Z' => Ok(Self::Z),
            'W' => Ok(Self::W),
            'Y' => Ok(Self::Y),
            _ => Err(InvalidSpeedRating(value.to_string())),
        }
    }
}

impl FromStr for SpeedRating {
    type Err = InvalidSpeedRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(InvalidSpeedRating(s.to_string())),
        }
    }
}

impl fmt::Display for SpeedRating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error returned when a character or string is not a valid speed rating.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid speed rating '{0}': expected one of N, P, Q, R, S, T, U, H, V, Z, W, Y")]
pub struct InvalidSpeedRating(String);
