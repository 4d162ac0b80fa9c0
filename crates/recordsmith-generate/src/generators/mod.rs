//! Random value generators backing the dynamic field kinds.

pub mod pattern;
pub mod uuid_v4;

pub use pattern::{DIGIT_POOL, LETTER_POOL, SPECIAL_POOL, generate_pattern};
pub use uuid_v4::random_uuid;
