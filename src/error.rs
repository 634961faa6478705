//! Error types for configuration loading and grid construction.

use thiserror::Error;

/// Errors raised while loading or validating a [`HexMapConfig`](crate::config::HexMapConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid YAML for the expected schema.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A field holds a value the map cannot be built from.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

/// Errors that abort construction of a [`ScrollingGrid`](crate::map::ScrollingGrid).
#[derive(Error, Debug)]
pub enum GridError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A chunk's vertex buffer does not have the size its layout requires.
    #[error("chunk ({x},{z}) has {actual} vertices, expected {expected}")]
    BufferSize {
        /// Chunk column.
        x: usize,
        /// Chunk row.
        z: usize,
        /// Vertices the layout requires.
        expected: usize,
        /// Vertices the mesh reported.
        actual: usize,
    },
}
