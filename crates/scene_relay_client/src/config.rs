//! Viewer configuration.
//!
//! ```toml
//! server_url = "http://localhost:3000"
//! poll_interval_ms = 100
//! frame_rate = 60
//! viewport = [1280, 720]
//! camera_position = [0.0, 10.0, 30.0]
//! camera_pitch_deg = -15.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use scene_relay_shared::constants::FRAME_RATE;
use scene_relay_shared::{DEFAULT_SERVER_URL, POLL_INTERVAL_MS};

/// Viewer configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Relay base URL.
    pub server_url: String,
    /// Interval between snapshot polls.
    pub poll_interval_ms: u64,
    /// Per-request timeout.
    pub request_timeout_ms: u64,
    /// Display refresh rate driving the render loop.
    pub frame_rate: u32,
    /// Viewport size in pixels.
    pub viewport: [u32; 2],
    /// Camera position.
    pub camera_position: [f32; 3],
    /// Camera yaw in degrees.
    pub camera_yaw_deg: f32,
    /// Camera pitch in degrees.
    pub camera_pitch_deg: f32,
    /// Fraction of the remaining distance covered per reference frame.
    pub smoothing_fraction: f32,
    /// Extra height above an object's top at which its label floats.
    pub label_margin: f32,
    /// Seconds between status log lines.
    pub status_interval_secs: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            poll_interval_ms: POLL_INTERVAL_MS,
            request_timeout_ms: 2_000,
            frame_rate: FRAME_RATE,
            viewport: [1280, 720],
            camera_position: [0.0, 0.0, 0.0],
            camera_yaw_deg: 0.0,
            camera_pitch_deg: 0.0,
            smoothing_fraction: 0.2,
            label_margin: 1.0,
            status_interval_secs: 5,
        }
    }
}

impl ViewerConfig {
    /// Reads a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Poll cadence.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Render cadence.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadence() {
        let config = ViewerConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
        assert!((config.frame_interval().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_toml() {
        let config = ViewerConfig::from_toml(
            "server_url = \"http://relay:4000\"\nviewport = [800, 600]",
        )
        .unwrap();
        assert_eq!(config.server_url, "http://relay:4000");
        assert_eq!(config.viewport, [800, 600]);
        assert_eq!(config.poll_interval_ms, 100);
    }

    #[test]
    fn test_zero_rates_do_not_panic() {
        let config = ViewerConfig {
            poll_interval_ms: 0,
            frame_rate: 0,
            request_timeout_ms: 0,
            ..ViewerConfig::default()
        };
        assert!(config.poll_interval() > Duration::ZERO);
        assert!(config.frame_interval() > Duration::ZERO);
        assert!(config.request_timeout() > Duration::ZERO);
    }
}
