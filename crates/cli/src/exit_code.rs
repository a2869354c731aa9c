//! Exit codes for the flatconf CLI.
//!
//! Scripts and CI jobs can tell a broken configuration apart from a file
//! that merely failed to resolve.

use flatconf_config::ConfigError;

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - configuration valid, every file resolved
    Success = 0,
    /// A file could not be resolved (rule plugin not bound for it)
    ResolutionError = 1,
    /// Configuration error (missing, unparsable or failing integrity checks)
    ConfigError = 2,
    /// I/O error (file read failure, path does not exist)
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Io(_) => Self::IoError,
            ConfigError::UnboundPlugin { .. } => Self::ResolutionError,
            ConfigError::Invalid { .. }
            | ConfigError::UnsupportedFormat(_)
            | ConfigError::Empty
            | ConfigError::Integrity(_) => Self::ConfigError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ResolutionError => write!(f, "resolution error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatconf_config::IntegrityReport;

    #[test]
    fn config_errors_map_to_exit_codes() {
        let io = ConfigError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(ExitCode::from(&io), ExitCode::IoError);
        assert_eq!(ExitCode::from(&ConfigError::Empty), ExitCode::ConfigError);
        assert_eq!(
            ExitCode::from(&ConfigError::Integrity(IntegrityReport::default())),
            ExitCode::ConfigError
        );

        let unbound = ConfigError::UnboundPlugin {
            rule: "svelte/valid-compile".into(),
            plugin: "svelte".into(),
            path: "src/a.ts".into(),
        };
        assert_eq!(ExitCode::from(&unbound), ExitCode::ResolutionError);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::ResolutionError.code(), 1);
        assert_eq!(ExitCode::ConfigError.code(), 2);
        assert_eq!(ExitCode::IoError.code(), 4);
    }
}
