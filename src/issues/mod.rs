//! Issue taxonomy, issue sink, and the collector that accumulates findings
//!
//! Rule modules report findings as bare numeric codes through the [`IssueSink`]
//! trait. The sink owns everything else: resolving a code to its [`Level`] and
//! message via the static code table, attributing it to the scope's
//! fully-qualified name, ordering, and exclusion.
//!
//! # Implementation Model
//!
//! Codes are statically registered in `code.rs`, one entry per code, sorted by
//! id. The [`Collector`] is the standard sink: it guards a map of FQN to issues
//! with a mutex so several rule modules may report into shared sinks from
//! different threads. Each `add_code` call is recorded immediately; there is no
//! batching.

mod collector;
mod issue;
mod level;

pub mod code;

pub use collector::{Collector, Outcome};
pub use issue::Issue;
pub use level::Level;

use crate::scope::ScopeContext;

/// Destination for issues emitted by rule modules.
///
/// Implementations must tolerate concurrent calls from multiple rule modules.
pub trait IssueSink: Send + Sync {
    /// Record `code` against the fully-qualified name of `ctx`.
    fn add_code(&self, ctx: &ScopeContext, code: u16);
}
