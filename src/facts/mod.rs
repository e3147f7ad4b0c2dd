//! Read-only cluster facts consumed by rule modules
//!
//! Rule modules never talk to the cluster themselves. They consume already-resolved
//! facts through the [`ClusterLister`] capability, which is cheap to query and safe
//! to share between rule modules running concurrently.
//!
//! [`ClusterSnapshot`] is the file-backed implementation used by the command line:
//! a JSON document whose version block matches the `serverVersion` object printed
//! by `kubectl version -o json`.

mod snapshot;

pub use snapshot::{ClusterSnapshot, ServerVersion};

/// Queries about cluster-wide state.
///
/// Implementations are responsible for their own thread safety. Queries must be
/// free of side effects.
pub trait ClusterLister: Send + Sync {
    /// The control-plane version as unparsed `(major, minor)` strings.
    fn list_version(&self) -> (String, String);

    /// Whether a metrics subsystem (metrics-server) is available.
    fn has_metrics(&self) -> bool;
}
