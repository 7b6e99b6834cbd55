// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types. Decoding itself never fails, so these only cover the edges: reading from
//! the byte source, naming an event kind, and loading configuration.

/// Errors from the public API of this crate.
///
/// | Variant               | Cause                                                   |
/// | :-------------------- | :------------------------------------------------------ |
/// | [`Read`]              | The byte source given to [`TtyInput::run()`] failed     |
/// | [`UnknownEventKind`]  | [`EventDispatcher::subscribe_by_name()`] got a bad name |
/// | [`Config`]            | See [`ConfigError`]                                     |
///
/// [`Read`]: Self::Read
/// [`UnknownEventKind`]: Self::UnknownEventKind
/// [`Config`]: Self::Config
/// [`TtyInput::run()`]: crate::TtyInput::run
/// [`EventDispatcher::subscribe_by_name()`]: crate::EventDispatcher::subscribe_by_name
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TtyInputError {
    #[error("Failed to read from the terminal input source")]
    #[diagnostic(
        code(tty_input::read),
        help(
            "The reader returned an error other than `Interrupted`. \
             Any armed escape deadline was cancelled and pending bytes were dropped."
        )
    )]
    Read(#[source] std::io::Error),

    #[error("Unknown event kind `{0}`")]
    #[diagnostic(
        code(tty_input::unknown_event_kind),
        help("Use one of: keypress, mousedown, mouseup, mousemove")
    )]
    UnknownEventKind(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from loading or validating [`TtyInputConfig`].
///
/// [`TtyInputConfig`]: crate::TtyInputConfig
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Failed to parse tty input configuration JSON")]
    #[diagnostic(
        code(tty_input::config::json),
        help("Expected an object with an optional `escKeyTimeout` in milliseconds")
    )]
    Json(#[source] serde_json::Error),

    #[error("escKeyTimeout of {actual_ms} ms is above the maximum of {max_ms} ms")]
    #[diagnostic(code(tty_input::config::esc_key_timeout_too_large))]
    EscKeyTimeoutTooLarge { actual_ms: u128, max_ms: u128 },
}
