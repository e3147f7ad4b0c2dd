//! Attribution scope carried alongside cancellation through a sanitization run
//!
//! A [`ScopeContext`] pairs a cancellation token with an ordered path of
//! human-readable segments (e.g. `Metrics`, `Version`). Every issue emitted
//! downstream is attributed to the context's fully-qualified name, so checks
//! never have to thread an explicit label through their calls.
//!
//! Scopes are strictly nested: [`ScopeContext::with_scope`] derives a child and
//! leaves the parent untouched. There is no removal operation; a child scope is
//! simply dropped when its check completes.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Separator used when rendering a scope path as a fully-qualified name.
pub const FQN_SEPARATOR: &str = "/";

/// Cancellation and attribution context for a sanitization run.
#[derive(Debug, Clone, Default)]
pub struct ScopeContext {
    token: CancellationToken,
    path: Arc<[Arc<str>]>,
}

impl ScopeContext {
    /// Create a root context with an empty scope path.
    #[must_use]
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            path: Arc::from(Vec::new()),
        }
    }

    /// Derive a child context whose path is this context's path plus `segment`.
    ///
    /// The child observes cancellation of this context, but cancelling the child
    /// does not affect this context.
    #[must_use]
    pub fn with_scope(&self, segment: impl Into<Arc<str>>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().map(Arc::clone));
        path.push(segment.into());

        Self {
            token: self.token.child_token(),
            path: path.into(),
        }
    }

    /// The scope segments, outermost first.
    #[must_use]
    pub fn path(&self) -> &[Arc<str>] {
        &self.path
    }

    /// The fully-qualified name of this scope, e.g. `cluster/Version`.
    #[must_use]
    pub fn fqn(&self) -> String {
        self.path.join(FQN_SEPARATOR)
    }

    /// Whether this context, or any context it was derived from, has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token observed by this context; cancelling it cancels this scope and its children.
    #[must_use]
    pub const fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }
}
