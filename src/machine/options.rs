//! Construction-time machine policy.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options-map key selecting the [`Strictness`].
pub const OPTIONS_KEY_STRICT: &str = "strict";

/// Value of the `strict` option that turns on [`Strictness::SimultaneousSignalTransitions`].
pub const STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS: &str = "STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS";

/// Default cap on direct transitions applied by a single `refresh`.
pub const DEFAULT_MAX_CASCADE_DEPTH: usize = 64;

/// How the machine treats several transitions satisfied at once.
///
/// In options maps this is written as `false` (lenient) or as the string
/// `"STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Take the first satisfied transition in table order.
    #[default]
    Lenient,
    /// Refuse to choose: fail with [`MachineError::Strict`](super::MachineError::Strict).
    SimultaneousSignalTransitions,
}

impl Strictness {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::SimultaneousSignalTransitions)
    }
}

impl Serialize for Strictness {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Lenient => serializer.serialize_bool(false),
            Self::SimultaneousSignalTransitions => {
                serializer.serialize_str(STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Strictness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Bool(false) => Ok(Self::Lenient),
            serde_json::Value::String(ref s) if s == STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS => {
                Ok(Self::SimultaneousSignalTransitions)
            }
            other => Err(de::Error::custom(format!(
                "unsupported `{OPTIONS_KEY_STRICT}` value {other}, expected false or \
                 \"{STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS}\""
            ))),
        }
    }
}

/// Errors raised while reading machine options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid machine options: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_cascade_depth must be at least 1")]
    ZeroCascadeDepth,
}

/// Policy fixed when a machine is built.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use waypoint::machine::{MachineOptions, Strictness};
///
/// let options = MachineOptions::from_json(&json!({
///     "strict": "STRICT_SIMULTANEOUS_SIGNAL_TRANSITIONS",
///     "max_cascade_depth": 8,
/// }))
/// .unwrap();
///
/// assert_eq!(options.strict, Strictness::SimultaneousSignalTransitions);
/// assert_eq!(options.max_cascade_depth, 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    pub strict: Strictness,
    pub max_cascade_depth: usize,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            strict: Strictness::Lenient,
            max_cascade_depth: DEFAULT_MAX_CASCADE_DEPTH,
        }
    }
}

impl MachineOptions {
    /// Lenient options with the default cascade cap.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict options with the default cascade cap.
    pub fn strict() -> Self {
        Self {
            strict: Strictness::SimultaneousSignalTransitions,
            ..Self::default()
        }
    }

    pub fn with_max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = depth;
        self
    }

    /// Read options from a JSON map. Unknown keys are ignored.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_value(value.clone())?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_cascade_depth == 0 {
            return Err(OptionsError::ZeroCascadeDepth);
        }
        Ok(())
    }
}
