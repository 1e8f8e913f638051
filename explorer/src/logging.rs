//! Tracing subscriber setup shared by the binaries

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` takes precedence over `level`. Logs go to stderr so stdout
/// stays free for rendered output.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
