//! Runtime settings supplied by the presentation surface.

use thiserror::Error;

/// Bounds for the display channel count.
pub const MIN_SENSORS: u8 = 1;
pub const MAX_SENSORS: u8 = 3;

/// Bounds for the alarm threshold, in degrees Celsius.
pub const MIN_THRESHOLD: u32 = 0;
pub const MAX_THRESHOLD: u32 = 150;

/// Validation failures are surfaced for user correction; they never change
/// any running state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("endpoint cannot be empty")]
    EmptyEndpoint,
    #[error("sensor count {0} out of range (1-3)")]
    SensorCount(u8),
    #[error("alarm threshold {0} out of range (0-150)")]
    Threshold(u32),
}

/// User-facing configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sensor node endpoint (host or host:port).
    pub endpoint: String,
    /// How many channels to display (1-3). Pure visibility; does not
    /// affect tracking.
    pub sensors: u8,
    /// Alarm threshold in degrees Celsius.
    pub threshold: u32,
    /// Use the synthetic generator instead of real hardware.
    pub mock: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "192.168.1.100".to_string(),
            sensors: 3,
            threshold: 100,
            mock: false,
        }
    }
}

impl Settings {
    /// Check all fields, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint(&self.endpoint)?;
        if !(MIN_SENSORS..=MAX_SENSORS).contains(&self.sensors) {
            return Err(ConfigError::SensorCount(self.sensors));
        }
        validate_threshold(self.threshold)?;
        Ok(())
    }
}

/// Reject blank endpoints before any source (re)start. Returns the
/// trimmed endpoint on success.
pub fn validate_endpoint(endpoint: &str) -> Result<&str, ConfigError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }
    Ok(trimmed)
}

pub fn validate_threshold(threshold: u32) -> Result<(), ConfigError> {
    if threshold > MAX_THRESHOLD {
        return Err(ConfigError::Threshold(threshold));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert_eq!(validate_endpoint(""), Err(ConfigError::EmptyEndpoint));
        assert_eq!(validate_endpoint("   "), Err(ConfigError::EmptyEndpoint));
        assert_eq!(validate_endpoint(" 10.0.0.7 "), Ok("10.0.0.7"));
    }

    #[test]
    fn test_sensor_count_bounds() {
        let mut settings = Settings::default();
        settings.sensors = 0;
        assert_eq!(settings.validate(), Err(ConfigError::SensorCount(0)));
        settings.sensors = 4;
        assert_eq!(settings.validate(), Err(ConfigError::SensorCount(4)));
        settings.sensors = 2;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(150).is_ok());
        assert_eq!(validate_threshold(151), Err(ConfigError::Threshold(151)));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(ConfigError::EmptyEndpoint.to_string(), "endpoint cannot be empty");
        assert_eq!(
            ConfigError::Threshold(200).to_string(),
            "alarm threshold 200 out of range (0-150)"
        );
    }
}
