use serde::{Deserialize, Serialize};
use thiserror::Error;

// Selected by build.rs from ACTIVITY_WINDOW_SIZE; any other value fails the build.
#[cfg(activity_window = "32")]
pub const WINDOW_SIZE: usize = 32;
#[cfg(activity_window = "64")]
pub const WINDOW_SIZE: usize = 64;
#[cfg(activity_window = "128")]
pub const WINDOW_SIZE: usize = 128;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid node config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid node config: {0}")]
    Invalid(&'static str),
}

/// Runtime settings of the sampling loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Samples requested from the sensor on every tick.
    pub samples_per_tick: usize,
    /// Reports buffered towards the network side before new ones are dropped.
    pub report_channel_capacity: usize,
    /// Period of the tick timer driving the loop.
    pub send_interval_ms: u32,
    pub node_id: u16,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            samples_per_tick: WINDOW_SIZE,
            report_channel_capacity: 16,
            send_interval_ms: 1000,
            node_id: 0,
        }
    }
}

impl NodeConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: NodeConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Timestamp stamped on reports produced by the given tick.
    pub fn tick_timestamp(&self, tick: u32) -> u32 {
        tick.wrapping_mul(self.send_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_per_tick == 0 {
            return Err(ConfigError::Invalid("samples_per_tick must be positive"));
        }
        if self.report_channel_capacity == 0 {
            return Err(ConfigError::Invalid("report_channel_capacity must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_size_matches_build_env() {
        assert_eq!(env!("ACTIVITY_WINDOW_SIZE").parse::<usize>().unwrap(), WINDOW_SIZE);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = NodeConfig::from_json(r#"{"node_id": 7, "send_interval_ms": 250}"#).unwrap();
        assert_eq!(cfg.node_id, 7);
        assert_eq!(cfg.send_interval_ms, 250);
        assert_eq!(cfg.samples_per_tick, WINDOW_SIZE);
        assert_eq!(cfg.report_channel_capacity, 16);
    }

    #[test]
    fn tick_timestamps_follow_send_interval() {
        let cfg = NodeConfig::from_json(r#"{"send_interval_ms": 250}"#).unwrap();
        assert_eq!(cfg.tick_timestamp(0), 0);
        assert_eq!(cfg.tick_timestamp(3), 750);
        assert_eq!(NodeConfig::default().tick_timestamp(5), 5000);
    }

    #[test]
    fn rejects_zero_sizes() {
        assert!(matches!(
            NodeConfig::from_json(r#"{"samples_per_tick": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            NodeConfig::from_json(r#"{"report_channel_capacity": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(NodeConfig::from_json("{"), Err(ConfigError::Json(_))));
    }
}
