//! Augmented mapping containers.
//!
//! Two independent structures, each usable standalone:
//! - [`SetRelation`]: key → set-of-items mapping with a maintained reverse
//!   index from items back to keys.
//! - [`CanonicalKeyMap`]: a mapping whose composite keys are
//!   order-independent, canonicalized by sorting.

pub mod canonical;
pub mod set_relation;

// Re-export the containers at module level
pub use canonical::CanonicalKeyMap;
pub use set_relation::SetRelation;
