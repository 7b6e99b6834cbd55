// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tracing subscriber setup for applications and tests that want to see the decoder's
//! `DEBUG_TTY_INPUT_*` logs.
//!
//! Display output only. The terminal being decoded is usually the same one logs would
//! go to, so [`DisplayPreference::Stderr`] is the default and lets stdout stay clean.

use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayPreference {
    Stdout,
    #[default]
    Stderr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub display_preference: DisplayPreference,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            display_preference: DisplayPreference::default(),
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn new(level_filter: LevelFilter, display_preference: DisplayPreference) -> Self {
        Self {
            level_filter,
            display_preference,
        }
    }
}

/// This erases the concrete type of the writer, and returns a boxed layer.
#[must_use]
pub fn create_display_layer<S>(tracing_config: TracingConfig) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    match tracing_config.display_preference {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(tracing_config.level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(tracing_config.level_filter),
        ),
    }
}

/// Returns the layers. This does not initialize the tracing system.
#[must_use]
pub fn create_layers(
    tracing_config: TracingConfig,
) -> Vec<Box<DynLayer<tracing_subscriber::Registry>>> {
    let level_filter: Box<DynLayer<tracing_subscriber::Registry>> =
        Box::new(tracing_config.level_filter);
    vec![level_filter, create_display_layer(tracing_config)]
}

/// Install a global subscriber built from `tracing_config`.
///
/// # Errors
///
/// If a global subscriber is already installed.
pub fn try_initialize_logging_global(tracing_config: TracingConfig) -> miette::Result<()> {
    tracing_subscriber::registry()
        .with(create_layers(tracing_config))
        .try_init()
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_logs_debug_to_stderr() {
        let config = TracingConfig::default();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert_eq!(config.display_preference, DisplayPreference::Stderr);
    }

    #[test]
    fn test_create_layers() {
        let config = TracingConfig::new(LevelFilter::INFO, DisplayPreference::Stdout);
        assert_eq!(create_layers(config).len(), 2);
    }

    #[test]
    fn test_scoped_subscriber_accepts_decoder_logs() {
        let subscriber = tracing_subscriber::registry().with(create_layers(TracingConfig::default()));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(message = "decoder log", bytes = ?[0x1b_u8]);
        });
    }
}
