//! Command dispatch logic for kube-sanitizer

use super::{InitArgs, SanitizeArgs, ValidateArgs, init_config, process_sanitize, validate_config};
use crate::scope::ScopeContext;
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

/// Log target for command dispatch
const LOG_TARGET: &str = "       run";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "kube-sanitizer", author, version, long_about = None)]
#[command(about = "Check a Kubernetes cluster against health and version policy")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: SanitizerSubcommand,
}

#[derive(Subcommand, Debug)]
enum SanitizerSubcommand {
    /// Run every rule module against a cluster facts snapshot and report issues
    Sanitize(Box<SanitizeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
/// While a command runs, Ctrl-C cancels the root scope so rule modules stop before
/// their next check.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    let token = CancellationToken::new();
    let listener = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!(target: LOG_TARGET, "Interrupted, cancelling sanitization");
                token.cancel();
            }
        })
    };

    let ctx = ScopeContext::new(token);
    let result = match &cli.command {
        SanitizerSubcommand::Sanitize(sanitize_args) => process_sanitize(host, sanitize_args, &ctx),
        SanitizerSubcommand::Init(init_args) => init_config(host, init_args),
        SanitizerSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    };

    listener.abort();
    result
}
