pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod library;
pub mod models;
pub mod services;
pub mod shutdown;
pub mod state;

pub use config::Config;
pub use db::Store;
pub use services::{LibraryHandle, LibraryReconciler, ShowError, ShowService, UpdateOutcome};
pub use shutdown::ShutdownFlag;
pub use state::{HostServices, SharedState};

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; called once by the host at startup.
/// `RUST_LOG` wins over `general.log_level`. Fails if a subscriber is
/// already installed.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_tracing_installs_json_subscriber_once() {
        let mut config = Config::default();
        config.general.log_format = "json".to_string();
        config.general.log_level = "debug".to_string();

        assert!(init_tracing(&config).is_ok());
        tracing::info!(component = "tests", "subscriber installed");

        assert!(init_tracing(&config).is_err());
    }
}
