//! Output formats
mod canonical;
mod tabular;

pub use canonical::{nudge, CanonicalLog, SYNTHESIZED_ANNOTATION};
pub use tabular::{to_csv, NO_DATA};
