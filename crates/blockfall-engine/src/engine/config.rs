use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a rotation is committed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPolicy {
    /// Rotate unconditionally, even into walls or locked cells.
    #[default]
    Permissive,
    /// Reject a rotation whose cells would leave the board or overlap
    /// locked cells.
    Guarded,
}

/// Tunables for a [`GameEngine`](crate::GameEngine).
///
/// By default the speed starts at `1000` and the timer never fires faster
/// than every 100 ms.
///
/// ```
/// use blockfall_engine::{EngineConfig, RotationPolicy};
///
/// let config: EngineConfig = serde_json::from_str(r#"{ "rotation": "guarded" }"#).unwrap();
/// assert_eq!(config.rotation, RotationPolicy::Guarded);
/// assert_eq!(config.initial_speed, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Starting value of the speed scalar, in milliseconds per drop.
    pub initial_speed: i64,
    /// Floor applied when the speed scalar is turned into a timer interval.
    #[serde(with = "millis")]
    pub min_drop_interval: Duration,
    pub rotation: RotationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1000,
            min_drop_interval: Duration::from_millis(100),
            rotation: RotationPolicy::Permissive,
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = EngineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"initial_speed":1000,"min_drop_interval":100,"rotation":"permissive"}"#
        );
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "min_drop_interval": 50 }"#).unwrap();
        assert_eq!(config.min_drop_interval, Duration::from_millis(50));
        assert_eq!(config.initial_speed, 1000);
        assert_eq!(config.rotation, RotationPolicy::Permissive);
    }

    #[test]
    fn test_unknown_rotation_rejected() {
        assert!(serde_json::from_str::<EngineConfig>(r#"{ "rotation": "srs" }"#).is_err());
    }
}
