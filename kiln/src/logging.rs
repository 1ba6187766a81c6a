//! Tracing subscriber setup.
//!
//! | Flag(s)   | Level |
//! |-----------|-------|
//! | (none)    | warn  |
//! | `-v`      | info  |
//! | `-vv`     | debug |
//! | `-vvv`    | trace |
//! | `--quiet` | error |
//!
//! `KILN_LOG` overrides all of the above.

use eyre::{Result, eyre};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::GlobalArgs;

const ENV_VAR: &str = "KILN_LOG";

/// Install the global subscriber. Library crates only emit events.
pub fn init(args: &GlobalArgs) -> Result<()> {
    let level = level(args);
    let filter = EnvFilter::try_from_env(ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kiln={level},kiln_codegen={level},kiln_codegen_java={level},\
             kiln_codegen_resources={level},kiln_core={level},kiln_index={level}"
        ))
    });

    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()
        .map_err(|e| eyre!("failed to initialise logging: {}", e))
}

fn level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
