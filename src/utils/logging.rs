use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Install an `env_logger` backed logger for hosts that do not set up their
/// own. Safe to call more than once; only the first call has any effect.
///
/// `RUST_LOG` still wins over `enable_debug` when it is set.
pub fn init_logging(enable_debug: bool) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(if enable_debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        });
        builder.parse_default_env();
        if let Err(e) = builder.try_init() {
            log::debug!("🔍 Logger already installed by the host: {e}");
        }
    });
}
