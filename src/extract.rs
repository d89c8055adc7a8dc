//! Extraction of structured specifications from free-form descriptions.
//!
//! A description must open with a size prefix (`225/45R17`); everything
//! after that is heuristic. The load/speed search runs a priority cascade,
//! stopping at the first stage that produces a gated match:
//!
//! 1. A dual load (`91/89W`) directly after the size token
//! 2. A single load (`91W`) directly after the size token, then the first
//!    word-boundary load/rating pair anywhere in the description
//! 3. Any dual load with a valid rating letter, scanning the whole text
//! 4. Any single load with a valid rating letter, scanning the whole text
//!
//! Stages 1 and 2 accept any adjacent capital as the rating candidate and
//! fall back to the leftmost valid rating letter elsewhere in the text when
//! that candidate is not itself valid. The broader stages only accept
//! letters from the rating alphabet. A description with no discoverable
//! pair still extracts; it only fails [`validate`].
//!
//! Both [`extract`] and [`validate`] consult the same cascade, so a
//! description validates cleanly exactly when extraction recovers both a
//! load index and a speed rating.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::{LoadIndex, OeFitment, SpeedRating, TyreSize, TyreSpec};

/// Dual load with rating candidate, anchored to the end of the size token.
static DUAL_AT_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s+(\d+)/(\d+)([A-Z])").expect("valid regex"));

/// Single load with rating candidate, anchored to the end of the size token.
static SINGLE_AT_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+(\d+)([A-Z])").expect("valid regex"));

/// Dual load with a valid rating letter, anywhere at word boundaries.
static DUAL_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2,3})/(\d{2,3})([NPQRSTUHVZWY])\b").expect("valid regex"));

/// Single load with a valid rating letter, anywhere at word boundaries.
static SINGLE_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2,3})([NPQRSTUHVZWY])\b").expect("valid regex"));

/// Extracts a structured specification from a catalogue description.
///
/// Returns `None` when the description is empty, whitespace-only, or does
/// not open with a size prefix. A missing load index, speed rating, or OE
/// fitment is not a failure; those fields are simply absent from the
/// returned spec.
///
/// # Examples
///
/// ```
/// use tyrespec::extract;
///
/// let spec = extract("225/45R17 91W *MO*").unwrap();
/// assert_eq!(spec.width(), "225");
/// assert_eq!(spec.pattern_code().as_deref(), Some("2254517W"));
/// assert_eq!(spec.oe_fitment().unwrap().as_str(), "MO");
/// ```
#[must_use]
pub fn extract(description: &str) -> Option<TyreSpec> {
    if description.trim().is_empty() {
        return None;
    }
    let (size, rest) = TyreSize::parse_prefix(description)?;
    let (load_index, speed_rating) = find_load_speed(description, rest);
    let oe_fitment = OeFitment::find_in(description);
    Some(TyreSpec::new(size, speed_rating, load_index, oe_fitment))
}

/// Checks whether a description is complete enough for product creation:
/// a size prefix plus a discoverable load-index/speed-rating pair.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first missing element. The
/// error display strings are intended to be shown to users as-is.
pub fn validate(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let Some((_, rest)) = TyreSize::parse_prefix(description) else {
        return Err(ValidationError::MissingSize);
    };
    let (load_index, speed_rating) = find_load_speed(description, rest);
    if load_index.is_none() || speed_rating.is_none() {
        return Err(ValidationError::MissingLoadSpeed);
    }
    Ok(())
}

/// Why a description failed validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The description is empty or whitespace-only.
    #[error("Description cannot be empty")]
    Empty,

    /// The description does not open with a size prefix.
    #[error("Description must start with size format (e.g., 225/45R17)")]
    MissingSize,

    /// No load-index/speed-rating pair was found anywhere.
    #[error("Description must include load index and speed rating (e.g., 91W or 91/89W)")]
    MissingLoadSpeed,
}

/// Runs the load/speed priority cascade.
///
/// `after_size` is the unconsumed remainder following the size prefix; the
/// anchored stages match against it, the global stages against the whole
/// description.
fn find_load_speed(
    description: &str,
    after_size: &str,
) -> (Option<LoadIndex>, Option<SpeedRating>) {
    // Stage 1: dual load directly after the size token.
    if let Some(caps) = DUAL_AT_SIZE.captures(after_size) {
        if let Some(load) = dual_load(&caps) {
            return (Some(load), rating_or_fallback(&caps[3], description));
        }
    }

    // Stage 2: single load directly after the size token.
    if let Some(caps) = SINGLE_AT_SIZE.captures(after_size) {
        if let Some(load) = single_load(&caps) {
            return (Some(load), rating_or_fallback(&caps[2], description));
        }
    }

    // Stage 2, broadened: the first word-boundary pair anywhere. Only the
    // leftmost match is considered; a gated-out match here falls through to
    // the exhaustive scans below.
    if let Some(caps) = SINGLE_ANYWHERE.captures(description) {
        if let Some(load) = single_load(&caps) {
            return (Some(load), caps[2].parse().ok());
        }
    }

    // Stage 3: every dual-load candidate in the description.
    for caps in DUAL_ANYWHERE.captures_iter(description) {
        if let Some(load) = dual_load(&caps) {
            return (Some(load), caps[3].parse().ok());
        }
    }

    // Stage 4: every single-load candidate in the description.
    for caps in SINGLE_ANYWHERE.captures_iter(description) {
        if let Some(load) = single_load(&caps) {
            return (Some(load), caps[2].parse().ok());
        }
    }

    (None, None)
}

/// Builds a gated dual load from capture groups 1 and 2.
fn dual_load(caps: &Captures) -> Option<LoadIndex> {
    let first = caps[1].parse().ok()?;
    let second = caps[2].parse().ok()?;
    LoadIndex::dual(first, second).ok()
}

/// Builds a gated single load from capture group 1.
fn single_load(caps: &Captures) -> Option<LoadIndex> {
    LoadIndex::single(caps[1].parse().ok()?).ok()
}

/// Accepts the adjacent letter when it is a valid rating, otherwise falls
/// back to the leftmost valid rating letter anywhere in the description.
fn rating_or_fallback(candidate: &str, description: &str) -> Option<SpeedRating> {
    candidate
        .parse()
        .ok()
        .or_else(|| SpeedRating::find_in(description))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn plain_description_extracts_every_field() {
        let spec = extract("225/45R17 91W").unwrap();
        assert_eq!(spec.width(), "225");
        assert_eq!(spec.profile(), "45");
        assert_eq!(spec.diameter(), "17");
        assert_eq!(spec.speed_rating(), Some(SpeedRating::W));
        assert_eq!(spec.load_index(), LoadIndex::single(91).ok());
        assert_eq!(spec.oe_fitment(), None);
        assert_eq!(spec.pattern_code().as_deref(), Some("2254517W"));
        assert_eq!(validate("225/45R17 91W"), Ok(()));
    }

    #[test]
    fn dual_load_after_run_flat_size() {
        let spec = extract("225/45RF17 91/89W").unwrap();
        assert_eq!(spec.width(), "225");
        assert_eq!(spec.profile(), "45");
        assert_eq!(spec.diameter(), "17");
        assert_eq!(spec.speed_rating(), Some(SpeedRating::W));
        assert_eq!(spec.load_index(), LoadIndex::dual(91, 89).ok());
    }

    #[test]
    fn delimited_fitment_alongside_ratings() {
        let spec = extract("225/45Z17 91W *MO*").unwrap();
        assert_eq!(spec.speed_rating(), Some(SpeedRating::W));
        assert_eq!(spec.load_index(), LoadIndex::single(91).ok());
        assert_eq!(spec.oe_fitment().unwrap().as_str(), "MO");
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "whitespace only")]
    #[test_case("\t\n"; "control whitespace")]
    #[test_case("17 91W"; "no width or profile")]
    #[test_case("MICHELIN PRIMACY"; "no digits at all")]
    #[test_case("225x45R17 91W"; "wrong separator")]
    fn unparseable_descriptions_return_none(description: &str) {
        assert_eq!(extract(description), None);
    }

    #[test]
    fn validation_messages() {
        assert_eq!(
            validate("").unwrap_err().to_string(),
            "Description cannot be empty"
        );
        assert_eq!(
            validate("17 91W").unwrap_err().to_string(),
            "Description must start with size format (e.g., 225/45R17)"
        );
        assert_eq!(
            validate("225/45R17").unwrap_err().to_string(),
            "Description must include load index and speed rating (e.g., 91W or 91/89W)"
        );
    }

    #[test]
    fn size_only_description_extracts_partially() {
        let spec = extract("225/45R17").unwrap();
        assert_eq!(spec.width(), "225");
        assert_eq!(spec.speed_rating(), None);
        assert_eq!(spec.load_index(), None);
        assert_eq!(spec.oe_fitment(), None);
        assert_eq!(spec.pattern_code(), None);
        assert!(validate("225/45R17").is_err());
    }

    #[test]
    fn run_flat_token_consumes_both_letters() {
        let spec = extract("225/45RF17 91W").unwrap();
        assert_eq!(spec.diameter(), "17");
    }

    #[test]
    fn load_gate_boundary() {
        let accepted = extract("225/45R17 65W").unwrap();
        assert_eq!(accepted.load_index(), LoadIndex::single(65).ok());

        let rejected = extract("225/45R17 64W").unwrap();
        assert_eq!(rejected.load_index(), None);
        assert_eq!(rejected.speed_rating(), None);
    }

    #[test]
    fn dual_load_with_one_gated_side_is_rejected() {
        let spec = extract("225/45R17 91/60W").unwrap();
        assert_eq!(spec.load_index(), None);
        assert_eq!(spec.speed_rating(), None);
        assert!(validate("225/45R17 91/60W").is_err());
    }

    #[test]
    fn invalid_adjacent_letter_recovers_rating_from_size_token() {
        // X is not a rating; the leftmost valid letter is the size token's R.
        let spec = extract("225/45R17 91/89X").unwrap();
        assert_eq!(spec.load_index(), LoadIndex::dual(91, 89).ok());
        assert_eq!(spec.speed_rating(), Some(SpeedRating::R));
        assert_eq!(validate("225/45R17 91/89X"), Ok(()));

        let spec = extract("225/45R17 88E").unwrap();
        assert_eq!(spec.load_index(), LoadIndex::single(88).ok());
        assert_eq!(spec.speed_rating(), Some(SpeedRating::R));
    }

    #[test]
    fn pair_after_brand_text_is_found() {
        let spec = extract("205/55R16 MICHELIN PRIMACY 4 91V").unwrap();
        assert_eq!(spec.load_index(), LoadIndex::single(91).ok());
        assert_eq!(spec.speed_rating(), Some(SpeedRating::V));
    }

    #[test]
    fn global_dual_scan_skips_gated_out_singles() {
        let spec = extract("225/45R17 SPORT 60Y 91/89W").unwrap();
        assert_eq!(spec.load_index(), LoadIndex::dual(91, 89).ok());
        assert_eq!(spec.speed_rating(), Some(SpeedRating::W));
    }

    #[test]
    fn leftmost_single_wins_before_global_dual_scan() {
        // The word-boundary single search sees the second half of a dual
        // marking first when the pair sits after brand text.
        let spec = extract("225/45R17 SPORT 91/89Y").unwrap();
        assert_eq!(spec.load_index(), LoadIndex::single(89).ok());
        assert_eq!(spec.speed_rating(), Some(SpeedRating::Y));
    }

    #[test]
    fn invalid_letter_away_from_size_is_not_a_pair() {
        // Adjacent-letter recovery only applies directly after the size
        // token; the broader scans insist on the rating alphabet.
        let spec = extract("225/45R17 MICHELIN 91X PILOT").unwrap();
        assert_eq!(spec.load_index(), None);
        assert_eq!(spec.speed_rating(), None);
        assert!(validate("225/45R17 MICHELIN 91X PILOT").is_err());
    }

    #[test]
    fn extraction_is_idempotent() {
        for description in ["225/45R17 91W *MO*", "225/45RF17 91/89W", "225/45R17"] {
            assert_eq!(extract(description), extract(description));
        }
    }

    #[test]
    fn size_components_are_always_digits() {
        let corpus = [
            "225/45R17 91W",
            "225/45RF17 91/89W",
            "315/30ZRF21 105Y N0",
            "225/45R17",
            "195/65R15 91T WINTERCONTACT",
        ];
        for description in corpus {
            let spec = extract(description).unwrap();
            for component in [spec.width(), spec.profile(), spec.diameter()] {
                assert!(!component.is_empty(), "{description}");
                assert!(component.chars().all(|c| c.is_ascii_digit()), "{description}");
            }
        }
    }

    #[test]
    fn validation_agrees_with_extraction() {
        let corpus = [
            "",
            "   ",
            "17 91W",
            "225/45R17",
            "225/45R17 91W",
            "225/45R17 64W",
            "225/45R17 91/60W",
            "225/45R17 91/89X",
            "225/45RF17 91/89W",
            "225/45Z17 91W *MO*",
            "205/55R16 MICHELIN PRIMACY 4 91V",
            "225/45R17 MICHELIN 91X PILOT",
            "225/45R17 SPORT 60Y 91/89W",
            "225/45R17 SPORT 91/89Y",
            "315/30ZRF21 105Y N0",
            "265/50R19 LR 110Y XL",
            "195/65R15 WINTER",
            "no size here 91W",
        ];
        for description in corpus {
            let complete = extract(description).is_some_and(|spec| {
                spec.load_index().is_some() && spec.speed_rating().is_some()
            });
            assert_eq!(
                validate(description).is_ok(),
                complete,
                "extraction and validation disagree on {description:?}"
            );
        }
    }
}
