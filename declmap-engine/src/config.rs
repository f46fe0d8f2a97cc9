//! Mapper configuration.

use crate::MapperResult;
use serde::{Deserialize, Serialize};

/// What to do when one pass lists the same id more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// The last occurrence is reconciled; earlier ones invoke no mapping.
    #[default]
    LastWins,
    /// The pass fails with `DuplicateId` before any mapping runs.
    Reject,
}

/// How `clear` reacts to a failing teardown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Tear down every entry, collect failures, always end empty.
    #[default]
    BestEffort,
    /// Stop at the first failure; untouched entries stay registered.
    FailFast,
}

/// Configuration for a [`DeclarationMapper`](crate::DeclarationMapper).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Policy for repeated ids within one pass.
    pub duplicate_ids: DuplicateIdPolicy,
    /// Policy for teardown failures during `clear`.
    pub clear_policy: ClearPolicy,
}

impl MapperConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> MapperResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
