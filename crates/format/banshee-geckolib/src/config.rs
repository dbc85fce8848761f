//! Loader configuration: unit scale and the unknown-bone policy.

use serde::{Deserialize, Serialize};

/// GeckoLib model units in one world block.
pub const DEFAULT_UNITS_PER_BLOCK: f32 = 16.0;

/// What to do with an animated bone the geometry does not declare.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownBonePolicy {
    /// Fail the load with [`FormatError::UnknownBone`](crate::FormatError::UnknownBone).
    #[default]
    Reject,
    /// Drop the bone and log a warning.
    Ignore,
}

/// Loader settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Divisor applied to pivots and positions.
    #[serde(default = "default_units_per_block")]
    pub units_per_block: f32,
    #[serde(default)]
    pub unknown_bones: UnknownBonePolicy,
}

fn default_units_per_block() -> f32 {
    DEFAULT_UNITS_PER_BLOCK
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            units_per_block: DEFAULT_UNITS_PER_BLOCK,
            unknown_bones: UnknownBonePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: LoaderConfig = serde_json::from_str(r#"{ "unknown_bones": "ignore" }"#).unwrap();
        assert_eq!(cfg.units_per_block, 16.0);
        assert_eq!(cfg.unknown_bones, UnknownBonePolicy::Ignore);
    }
}
