//! Domain models for tyre specifications.
//!
//! Each sidewall marking gets its own validated type: the size prefix, the
//! speed-rating alphabet, gated load-index values, and OE fitment markers.
//! [`TyreSpec`] composes them into the record consumed by product creation.

/// Tyre size (width/profile/diameter) types and parsing.
pub mod size;
pub use size::{Construction, Error as SizeError, TyreSize};

/// The speed-rating alphabet.
pub mod speed;
pub use speed::SpeedRating;

/// Load-index values and the validity gate.
pub mod load;
pub use load::{LoadIndex, MIN_LOAD_INDEX};

/// Original-equipment fitment markers.
pub mod fitment;
pub use fitment::OeFitment;

mod spec;
pub use spec::TyreSpec;
