//! Summaries of what a pass did.

use serde::{Deserialize, Serialize};

/// Mapping calls made by one `reconcile` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Ids that entered the registry.
    pub created: usize,
    /// Ids whose mapping received `update`.
    pub updated: usize,
    /// Ids torn down and re-created under a new kind.
    pub retyped: usize,
    /// Ids swept because they were absent from the input.
    pub destroyed: usize,
    /// Registry size after the pass.
    pub live: usize,
}

impl ReconcileReport {
    /// Returns true if the pass created, retyped or destroyed anything.
    ///
    /// Updates are not counted; only the mapping knows whether an update
    /// had any effect.
    pub fn changed_membership(&self) -> bool {
        self.created > 0 || self.retyped > 0 || self.destroyed > 0
    }
}

/// Outcome of a `clear`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearReport {
    /// Instances torn down.
    pub destroyed: usize,
}
