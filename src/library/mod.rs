//! Show library core: title normalization and record reconciliation.

pub mod reconcile;
pub mod titles;

pub use reconcile::{airs_dayofweek, apply_info, build_titles, parse_last_updated};
pub use titles::{QueryOptions, TitleQuery, canonical_text, condense, query, reduce, simplify};
