//! Severity types for lint rule configuration.

use std::str::FromStr;

/// Rule severity for lint configuration.
///
/// This represents how a lint rule should be reported, as configured
/// by the user. Rules can be turned off, reported as warnings, or as errors.
///
/// Configuration files may spell a severity as a string (`"off"`, `"warn"`,
/// `"error"`) or as the legacy numeric form (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RuleSeverity {
    /// Rule is disabled
    #[default]
    Off,
    /// Rule violations are reported as warnings
    Warn,
    /// Rule violations are reported as errors
    Error,
}

impl RuleSeverity {
    /// Returns true if the rule is enabled (warn or error).
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// The canonical string spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Convert the numeric form (`0`, `1`, `2`).
    #[must_use]
    pub const fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            _ => None,
        }
    }
}

/// Error returned when a string is not a recognized severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl ParseSeverityError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown severity '{}' (expected off, warn, error, 0, 1 or 2)",
            self.0
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for RuleSeverity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "0" => Ok(Self::Off),
            "warn" | "1" => Ok(Self::Warn),
            "error" | "2" => Ok(Self::Error),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

impl std::fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
