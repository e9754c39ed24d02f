use crate::tree::NodeId;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum JutilsError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot cast value of type '{found}' to '{expected}'")]
    Cast {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Dynamic value is empty")]
    EmptyValue,

    #[error("Failed to spawn thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    #[error("Thread '{0}' panicked")]
    ThreadPanicked(String),
}

/// Tree-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The handle does not point at a live node of this tree.
    #[error("Invalid node handle: {0}")]
    InvalidNode(NodeId),

    #[error("Duplicate entry into tree: {0}")]
    DuplicateKey(String),

    #[error("Child index {index} out of range for node with {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The root node cannot be removed from its own tree")]
    RootRemoval,
}

/// HTML tag scanning errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HtmlError {
    #[error("tag ({0}) is already closed")]
    AlreadyClosed(String),

    #[error("tag ({0}) is not a valid HTML tag")]
    NotATag(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, JutilsError>;
