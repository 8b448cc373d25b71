//! Subscriber setup for the `bazi` binary.
//!
//! `RUST_LOG` wins when set; otherwise `-v` lowers the default level to
//! `debug` for the bazi crates. Output goes to stderr so that stdout stays
//! clean for chart text and JSON.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "bazi_search=debug,bazi_rs=debug,bazi=debug,info";

pub fn init(verbose: bool, json: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
