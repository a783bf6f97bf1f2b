use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Initialize tracing for the embedding host
///
/// Call once at startup. `RUST_LOG` wins over the configured level; a second
/// call is a no-op rather than a panic so test binaries can init freely.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.clone()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        let _ = subscriber.pretty().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
