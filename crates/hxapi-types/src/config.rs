//! Controller connection settings.
//!
//! Loaded from TOML; every field has a default so a partial file is valid.
//!
//! ```toml
//! medium = "ethernet"
//! address = "192.168.0.10"
//! port = 8193
//! timeout = "500ms"
//! sample_rate = 100
//! ```

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::comm::CommMedium;
use crate::typedef::{Int32, UInt32, Uint16};

/// Connection settings for the controller API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Transport used to reach the controller.
    pub medium: CommMedium,

    /// Controller IPv4 address.
    pub address: Ipv4Addr,

    /// Controller TCP port (Ethernet only).
    pub port: Uint16,

    /// RTX channel number, required by `rtx_ch` and rejected otherwise.
    pub channel: Option<Int32>,

    /// Connection timeout.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Polling rate in Hz.
    pub sample_rate: UInt32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            medium: CommMedium::Ethernet,
            address: Ipv4Addr::new(192, 168, 1, 100),
            port: 8193,
            channel: None,
            timeout: Duration::from_secs(1),
            sample_rate: 100,
        }
    }
}

impl ConnectionConfig {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&content)?;
        debug!(?path, medium = %config.medium, "Loaded connection config");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or fails validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check field combinations that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "sample_rate must be greater than zero".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Invalid("timeout must be greater than zero".into()));
        }
        if self.medium == CommMedium::Ethernet && self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero for ethernet".into()));
        }
        match (self.medium.requires_channel(), self.channel) {
            (true, None) => Err(ConfigError::Invalid(format!(
                "{} requires a channel",
                self.medium
            ))),
            (true, Some(channel)) if channel < 0 => Err(ConfigError::Invalid(format!(
                "channel must be non-negative, got {channel}"
            ))),
            (false, Some(_)) => Err(ConfigError::Invalid(format!(
                "channel is only valid for {}",
                CommMedium::RtxChannel
            ))),
            _ => Ok(()),
        }
    }

    /// Arguments for the controller's initialisation call:
    /// medium, the four address octets, then the port.
    #[must_use]
    pub fn init_args(&self) -> [Int32; 6] {
        let [a, b, c, d] = self.address.octets();
        [
            self.medium.as_raw(),
            Int32::from(a),
            Int32::from(b),
            Int32::from(c),
            Int32::from(d),
            Int32::from(self.port),
        ]
    }

    /// Interval between polls at the configured sample rate.
    #[must_use]
    pub fn sample_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.sample_rate.max(1)))
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Parsed values are inconsistent.
    #[error("invalid connection config: {0}")]
    Invalid(String),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert_eq!(config.medium, CommMedium::Ethernet);
        assert_eq!(config.sample_rate, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            medium = "ethernet"
            address = "192.168.0.10"
            port = 8193
            timeout = "500ms"
        "#;

        let config = ConnectionConfig::from_toml(toml).unwrap();
        assert_eq!(config.address, Ipv4Addr::new(192, 168, 0, 10));
        assert_eq!(config.timeout, Duration::from_millis(500));
        // Unset fields fall back to defaults
        assert_eq!(config.sample_rate, 100);
        assert_eq!(config.init_args(), [0, 192, 168, 0, 10, 8193]);
    }

    #[test]
    fn test_rtx_channel_requires_channel() {
        let err = ConnectionConfig::from_toml(r#"medium = "rtx_ch""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");

        let config = ConnectionConfig::from_toml("medium = \"rtx_ch\"\nchannel = 3").unwrap();
        assert_eq!(config.channel, Some(3));
        assert_eq!(config.init_args()[0], 2);
    }

    #[test]
    fn test_negative_channel_rejected() {
        let err = ConnectionConfig::from_toml("medium = \"rtx_ch\"\nchannel = -1").unwrap_err();
        assert!(err.to_string().contains("non-negative"), "{err}");
    }

    #[test]
    fn test_channel_rejected_for_ethernet() {
        let err = ConnectionConfig::from_toml("channel = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let err = ConnectionConfig::from_toml("sample_rate = 0").unwrap_err();
        assert!(err.to_string().contains("sample_rate"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ConnectionConfig::from_toml(r#"timeout = "0s""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("timeout"), "{err}");
    }

    #[test]
    fn test_zero_port_only_matters_for_ethernet() {
        assert!(ConnectionConfig::from_toml("port = 0").is_err());
        assert!(ConnectionConfig::from_toml("medium = \"rtx\"\nport = 0").is_ok());
    }

    #[test]
    fn test_unknown_medium_is_parse_error() {
        let err = ConnectionConfig::from_toml(r#"medium = "serial""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_sample_period() {
        let mut config = ConnectionConfig::default();
        assert_eq!(config.sample_period(), Duration::from_millis(10));
        config.sample_rate = 1;
        assert_eq!(config.sample_period(), Duration::from_secs(1));
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = ConnectionConfig {
            medium: CommMedium::RtxChannel,
            channel: Some(2),
            timeout: Duration::from_millis(250),
            ..ConnectionConfig::default()
        };
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("rtx_ch"), "{toml}");
        let parsed = ConnectionConfig::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "medium = \"rtx\"\naddress = \"10.0.0.5\"\nsample_rate = 250").unwrap();

        let config = ConnectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.medium, CommMedium::Rtx);
        assert_eq!(config.address, Ipv4Addr::new(10, 0, 0, 5));
        assert_eq!(config.sample_period(), Duration::from_millis(4));
    }

    #[test]
    fn test_from_file_invalid_values() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sample_rate = 0").unwrap();

        let err = ConnectionConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ConnectionConfig::from_file(Path::new("/nonexistent/HXApi.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
