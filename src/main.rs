//! A tool to check a Kubernetes cluster against health and version policy.
//!
//! # Overview
//!
//! `kube-sanitizer` reads a snapshot of cluster facts, runs a set of rule modules
//! against it, and reports every deviation as a severity-coded issue attributed to a
//! fully-qualified name such as `Version` or `Metrics`.
//!
//! # Quick Start
//!
//! Capture the facts and sanitize them:
//!
//! ```bash
//! kubectl version -o json | jq '. + {metricsAvailable: true}' > facts.json
//! kube-sanitizer sanitize --facts facts.json
//! ```
//!
//! # Issue Codes
//!
//! | Code | Level | Meaning                                                   |
//! |------|-------|-----------------------------------------------------------|
//! | 402  | info  | No metrics-server detected                                |
//! | 405  | warn  | Control-plane version outside the tolerated range         |
//! | 406  | ok    | Control-plane version within the tolerated range          |
//!
//! # Output Formats
//!
//! The console report is shown by default. Request a JSON report with `--json`:
//!
//! ```bash
//! kube-sanitizer sanitize --facts facts.json --json report.json
//! kube-sanitizer sanitize --facts facts.json --json report.json --console
//! ```
//!
//! # Failing Builds
//!
//! The command fails when a rule module cannot complete, for example because the
//! reported version is not numeric. Use `--fail-on` to also fail on issues:
//!
//! ```bash
//! kube-sanitizer sanitize --facts facts.json --fail-on warn
//! ```
//!
//! # Configuration
//!
//! Generate the default configuration and adjust it:
//!
//! ```bash
//! kube-sanitizer init
//! kube-sanitizer validate --config sanitizer.toml
//! ```
//!
//! ```toml
//! excluded_codes = [406]
//!
//! [cluster]
//! tolerable_major = 1
//! tolerable_minor = 24
//! ```

use kube_sanitizer::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real terminal.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
