use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// コンソール出力の初期化
///
/// `RUST_LOG` があればそれを使い、無ければ `info`（`--verbose` で `debug`）。
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .init();
}
