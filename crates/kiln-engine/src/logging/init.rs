use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` directive syntax
/// (e.g. `"debug"`, `"kiln_layout=debug,wgpu_core=warn"`) and takes
/// precedence over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor `RUST_LOG` is set.
    pub default_level: log::LevelFilter,
    /// Caps the chatty GPU backend crates at `warn` unless a directive
    /// names them explicitly.
    pub quiet_gpu: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            quiet_gpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const GPU_MODULES: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

#[derive(Debug, PartialEq, Eq)]
enum FilterSource {
    Directives(String),
    Level(log::LevelFilter),
}

fn resolve_filter(config: &LoggingConfig, rust_log: Option<String>) -> FilterSource {
    config
        .env_filter
        .clone()
        .or(rust_log)
        .filter(|s| !s.trim().is_empty())
        .map_or(FilterSource::Level(config.default_level), FilterSource::Directives)
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if config.quiet_gpu {
            for module in GPU_MODULES {
                builder.filter_module(module, log::LevelFilter::Warn);
            }
        }

        // Directives parsed after the GPU caps override them per module.
        match resolve_filter(&config, std::env::var("RUST_LOG").ok()) {
            FilterSource::Directives(filter) => {
                builder.parse_filters(&filter);
            }
            FilterSource::Level(level) => {
                builder.filter_level(level);
            }
        }

        builder.write_style(config.write_style);

        if let Err(err) = builder.try_init() {
            eprintln!("logger already installed: {err}");
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let config = LoggingConfig { env_filter: Some("debug".into()), ..Default::default() };
        assert_eq!(
            resolve_filter(&config, Some("warn".into())),
            FilterSource::Directives("debug".into())
        );
    }

    #[test]
    fn env_used_when_no_explicit_filter() {
        let config = LoggingConfig::default();
        assert_eq!(
            resolve_filter(&config, Some("kiln_layout=trace".into())),
            FilterSource::Directives("kiln_layout=trace".into())
        );
    }

    #[test]
    fn blank_env_falls_back_to_default_level() {
        let config = LoggingConfig { default_level: log::LevelFilter::Warn, ..Default::default() };
        assert_eq!(
            resolve_filter(&config, Some("  ".into())),
            FilterSource::Level(log::LevelFilter::Warn)
        );
        assert_eq!(resolve_filter(&config, None), FilterSource::Level(log::LevelFilter::Warn));
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig::default());
    }
}
