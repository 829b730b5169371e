use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the global tracing subscriber.
///
/// Filters come from `INVESTAL_LOG` (e.g. `INVESTAL_LOG=investal_advisor=debug`),
/// defaulting to info for the investal crates. Output goes to stderr: stdout
/// carries the MCP transport.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("INVESTAL_LOG").unwrap_or_else(|_| {
            EnvFilter::new("investal_mcp=info,investal_advisor=info,investal_core=info")
        });

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
