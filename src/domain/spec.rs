use std::fmt;

use super::{LoadIndex, OeFitment, SpeedRating, TyreSize};

/// The structured specification carried by a tyre description.
///
/// A spec always has a size; the load index, speed rating, and OE fitment
/// are only present when a confident match was found in the description.
/// Missing ratings are an expected outcome for terse catalogue rows, not a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TyreSpec {
    size: TyreSize,
    speed_rating: Option<SpeedRating>,
    load_index: Option<LoadIndex>,
    oe_fitment: Option<OeFitment>,
}

impl TyreSpec {
    /// Assembles a spec from pre-validated parts.
    #[must_use]
    pub const fn new(
        size: TyreSize,
        speed_rating: Option<SpeedRating>,
        load_index: Option<LoadIndex>,
        oe_fitment: Option<OeFitment>,
    ) -> Self {
        Self {
            size,
            speed_rating,
            load_index,
            oe_fitment,
        }
    }

    /// Returns the parsed size marking.
    #[must_use]
    pub const fn size(&self) -> &TyreSize {
        &self.size
    }

    /// Returns the section width digits.
    #[must_use]
    pub fn width(&self) -> &str {
        self.size.width()
    }

    /// Returns the aspect-ratio profile digits.
    #[must_use]
    pub fn profile(&self) -> &str {
        self.size.profile()
    }

    /// Returns the rim diameter digits.
    #[must_use]
    pub fn diameter(&self) -> &str {
        self.size.diameter()
    }

    /// Returns the speed rating, if one was found.
    #[must_use]
    pub const fn speed_rating(&self) -> Option<SpeedRating> {
        self.speed_rating
    }

    /// Returns the load index, if one was found.
    #[must_use]
    pub const fn load_index(&self) -> Option<LoadIndex> {
        self.load_index
    }

    /// Returns the OE fitment marker, if one was found.
    #[must_use]
    pub const fn oe_fitment(&self) -> Option<&OeFitment> {
        self.oe_fitment.as_ref()
    }

    /// Returns the derived pattern code: width, profile, diameter, and speed
    /// letter concatenated, e.g. `2254517W`.
    ///
    /// `None` until a speed rating is known; the size components are always
    /// present.
    #[must_use]
    pub fn pattern_code(&self) -> Option<String> {
        self.speed_rating.map(|speed| {
            format!(
                "{}{}{}{}",
                self.width(),
                self.profile(),
                self.diameter(),
                speed
            )
        })
    }
}

impl fmt::Display for TyreSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.size)?;
        if let Some(load) = self.load_index {
            write!(f, " {load}")?;
        }
        if let Some(speed) = self.speed_rating {
            write!(f, "{speed}")?;
        }
        if let Some(fitment) = &self.oe_fitment {
            write!(f, " {fitment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> TyreSize {
        "225/45R17".parse().unwrap()
    }

    #[test]
    fn pattern_code_requires_speed_rating() {
        let spec = TyreSpec::new(
            size(),
            Some(SpeedRating::W),
            LoadIndex::single(91).ok(),
            None,
        );
        assert_eq!(spec.pattern_code().as_deref(), Some("2254517W"));

        let spec = TyreSpec::new(size(), None, LoadIndex::single(91).ok(), None);
        assert_eq!(spec.pattern_code(), None);
    }

    #[test]
    fn display_reassembles_known_fields() {
        let spec = TyreSpec::new(
            size(),
            Some(SpeedRating::W),
            LoadIndex::dual(91, 89).ok(),
            OeFitment::find_in("*MO*"),
        );
        assert_eq!(spec.to_string(), "225/45R17 91/89W MO");

        let spec = TyreSpec::new(size(), None, None, None);
        assert_eq!(spec.to_string(), "225/45R17");
    }
}
