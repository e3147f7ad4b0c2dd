use super::Level;

/// Metrics subsystem (metrics-server) is not available in the cluster.
pub const METRICS_SERVER_MISSING: u16 = 402;

/// Control-plane version is outside the tolerated range.
pub const VERSION_OUT_OF_TOLERANCE: u16 = 405;

/// Control-plane version is within the tolerated range.
pub const VERSION_OK: u16 = 406;

/// Definition of a single issue code.
#[derive(Debug)]
pub struct CodeDef {
    /// Numeric code reported by rule modules.
    pub id: u16,

    /// Severity assigned to every issue carrying this code.
    pub level: Level,

    /// Human-readable message shown in reports.
    pub message: &'static str,
}

macro_rules! code_def {
    ($id:expr, $level:ident, $message:expr) => {
        CodeDef {
            id: $id,
            level: Level::$level,
            message: $message,
        }
    };
}

/// The issue code taxonomy, sorted by code.
pub const CODE_DEFINITIONS: &[CodeDef] = &[
    code_def!(METRICS_SERVER_MISSING, Info, "No metrics-server detected"),
    code_def!(
        VERSION_OUT_OF_TOLERANCE,
        Warn,
        "Is this a jurassic cluster? Might want to upgrade K8s a bit"
    ),
    code_def!(VERSION_OK, Ok, "K8s version OK"),
];

/// Look up the definition of an issue code.
#[must_use]
pub fn lookup(id: u16) -> Option<&'static CodeDef> {
    CODE_DEFINITIONS
        .binary_search_by_key(&id, |def| def.id)
        .ok()
        .and_then(|index| CODE_DEFINITIONS.get(index))
}
