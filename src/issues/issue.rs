use super::Level;
use super::code;

/// A single finding attributed to a fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub fqn: String,
    pub code: u16,
    pub level: Level,
    pub message: String,
}

impl Issue {
    /// Build an issue for `code`, resolving its level and message from the code table.
    ///
    /// Codes missing from the table are kept as `Error`-level issues so they are never
    /// silently lost.
    #[must_use]
    pub fn from_code(fqn: impl Into<String>, code: u16) -> Self {
        let (level, message) = code::lookup(code).map_or_else(
            || (Level::Error, format!("Unknown issue code {code}")),
            |def| (def.level, def.message.to_string()),
        );

        Self {
            fqn: fqn.into(),
            code,
            level,
            message,
        }
    }
}
