//! Core configuration for banshee-animation-core.

use serde::{Deserialize, Serialize};

/// What a bone lookup does when the animation has no data for the bone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Report the missing bone as an error. Useful for content authoring and
    /// offline validation.
    Strict,
    /// Substitute the empty pose so a partially authored animation still
    /// drives the whole skeleton.
    #[default]
    Lenient,
}

/// Configuration for bone lookup and pose composition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupPolicy,
}

impl Config {
    #[inline]
    pub fn strict() -> Self {
        Self {
            lookup: LookupPolicy::Strict,
        }
    }

    #[inline]
    pub fn lenient() -> Self {
        Self {
            lookup: LookupPolicy::Lenient,
        }
    }
}
