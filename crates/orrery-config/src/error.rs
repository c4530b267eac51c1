//! Errors surfaced by the RON config persistence layer.

/// What went wrong while loading or saving `config.ron`.
///
/// Generation and simulation never produce these; only the persistence
/// surface does, and callers are free to fall back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read config.ron: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config directory or file could not be written.
    #[error("could not write config.ron: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file's RON content did not deserialize into a [`Config`].
    ///
    /// [`Config`]: crate::Config
    #[error("config.ron is not valid config RON: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The in-memory config failed to serialize to RON.
    #[error("could not serialize config to RON: {0}")]
    SerializeError(#[source] ron::Error),
}
