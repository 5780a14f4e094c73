// ---------------------------------------------------------------------------
// Error types for configuration validation and generation runs
// ---------------------------------------------------------------------------

use std::fmt;

/// Reasons a [`crate::city_config::CityConfig`] is rejected at the boundary.
///
/// Out-of-range densities and counts are clamped instead; only values that
/// cannot be repaired end up here.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A ratio field was NaN.
    NotANumber(&'static str),
    /// Canvas extent outside the supported range.
    CanvasExtent { axis: &'static str, value: f32 },
    /// A textual enum value did not match any variant.
    UnknownVariant { field: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotANumber(field) => write!(f, "{field} is not a number"),
            ConfigError::CanvasExtent { axis, value } => {
                write!(f, "canvas {axis} {value} is outside the supported range")
            }
            ConfigError::UnknownVariant { field, value } => {
                write!(f, "unknown {field} '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that abort a generation run.
#[derive(Debug)]
pub enum GenerationError {
    /// The configuration failed validation.
    InvalidConfig(ConfigError),
    /// The run was cancelled between stages.
    Cancelled { stage: &'static str },
    /// Bitcode encoding of the blueprint failed.
    Encode(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
            GenerationError::Cancelled { stage } => {
                write!(f, "Generation cancelled before stage '{stage}'")
            }
            GenerationError::Encode(msg) => write!(f, "Encoding error: {msg}"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for GenerationError {
    fn from(e: ConfigError) -> Self {
        GenerationError::InvalidConfig(e)
    }
}

impl From<bitcode::Error> for GenerationError {
    fn from(e: bitcode::Error) -> Self {
        GenerationError::Encode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display_canvas() {
        let err = ConfigError::CanvasExtent {
            axis: "width",
            value: 12.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("width"), "got: {msg}");
        assert!(msg.contains("12"), "got: {msg}");
    }

    #[test]
    fn test_generation_error_display_cancelled() {
        let err = GenerationError::Cancelled { stage: "roads" };
        let msg = format!("{err}");
        assert!(msg.contains("cancelled"), "got: {msg}");
        assert!(msg.contains("roads"), "got: {msg}");
    }

    #[test]
    fn test_generation_error_from_config() {
        let err: GenerationError = ConfigError::NotANumber("park_ratio").into();
        assert!(matches!(err, GenerationError::InvalidConfig(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
