//! Genealogical tree with ancestry and cousin-degree relationship queries.
//!
//! A [`Family`] is built once by naming a founder and attaching named
//! children to existing members, then queried read-only: one-generation
//! ancestry checks and a [`Kinship`] classification that distinguishes
//! identity, direct lineage at any distance, and cousins of degree zero to
//! two with their removal (absolute depth difference).
//!
//! Nodes live in a [generational arena](FamilyArena); parent links are
//! non-owning indices, so the bidirectional tree carries no ownership cycles.

pub mod arena;
pub mod errors;
pub mod family;
pub mod kinship;
pub mod util;

pub use arena::{FamilyArena, FamilyIterator, Member};
pub use errors::{FamilyError, FamilyResult};
pub use family::Family;
pub use kinship::Kinship;
