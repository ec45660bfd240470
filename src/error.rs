use std::fmt;
use std::path::PathBuf;

/// Gameplay contract violations caught at the host boundary.
///
/// Inside the core every direction is a `Direction`, so these can only come
/// from raw values a host hands in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimError {
    InvalidDirection { found: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDirection { found } => {
                write!(f, "direction not allowed: {found:?} (expected Up, Down, Left or Right)")
            }
        }
    }
}

impl std::error::Error for SimError {}

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings from {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed settings json: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_direction_message_names_value() {
        let err = SimError::InvalidDirection {
            found: "Sideways".into(),
        };
        assert!(err.to_string().contains("Sideways"));
    }

    #[test]
    fn test_parse_error_exposes_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SettingsError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
