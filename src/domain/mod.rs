//! Domain types for the show library.

pub mod events;

use serde::{Deserialize, Serialize};
use std::fmt;

/// What `create_show` does about enrichment once the record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Run `update_show` and wait for it.
    #[default]
    Synchronous,
    /// Spawn `update_show` and return immediately.
    Detached,
    /// Leave the record as created.
    Skip,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Synchronous => "synchronous",
            Self::Detached => "detached",
            Self::Skip => "skip",
        };
        f.write_str(name)
    }
}
