//! Log output for the visualizer and the search library.
//!
//! Reads the `GRID_DIJKSTRA_LOG` environment variable using the usual filter syntax, for
//! example `GRID_DIJKSTRA_LOG=grid_dijkstra=trace`. Without it the level follows the `-v` and
//! `-q` flags. The interactive board owns the terminal, so there logging stays off unless the
//! variable is set (and stderr is best redirected to a file).

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "GRID_DIJKSTRA_LOG";

fn default_directive(verbose: u8, quiet: bool, interactive: bool) -> &'static str {
    match (quiet, interactive, verbose) {
        (true, _, _) => "error",
        (false, true, _) => "off",
        (false, false, 0) => "warn",
        (false, false, 1) => "debug",
        (false, false, _) => "trace",
    }
}

/// Installs the global subscriber. Records emitted through the `log` facade, which the search
/// library uses, are forwarded to it as well.
pub fn init(verbose: u8, quiet: bool, interactive: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet, interactive)));

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .try_init();
    if let Err(err) = result {
        eprintln!("warning: logging already initialised: {err}");
    }
}
