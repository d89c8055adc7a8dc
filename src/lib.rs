//! Structured tyre-specification extraction
//!
//! Catalogue descriptions such as `225/45R17 91W *MO*` pack a tyre's
//! structured fields into free-form text. This crate decomposes a
//! description into a [`TyreSpec`] and checks whether a description carries
//! enough detail for product creation.

pub mod domain;
pub use domain::{Construction, LoadIndex, OeFitment, SpeedRating, TyreSize, TyreSpec};

/// Extraction and validation of specifications from raw descriptions.
pub mod extract;
pub use extract::{ValidationError, extract, validate};
