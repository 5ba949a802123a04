use color_eyre::eyre::eyre;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber on stderr so stdout stays the table.
/// `RUST_LOG` overrides the default `warn` level.
pub fn init() -> color_eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!(e))?;
    Ok(())
}
