use std::fmt;

/// Errors at the engine's configuration seam. The audit computation itself
/// never fails: unresolvable or ambiguous bills are represented in the
/// result's verification status, not as errors.
#[derive(Debug)]
pub enum AuditError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (negative tolerance, inverted bounds, etc.).
    ConfigValidation(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for AuditError {}
