//! Error type shared by the DOM adapter, configuration and controller.
//!
//! None of these errors cross the public controller API. Operations catch
//! them, hand them to [`crate::report`] and degrade to no-ops.

/// Failure raised while locating, creating or mutating drawer chrome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawerError {
    /// No element matched a required selector.
    #[error("no element matches `{selector}`")]
    MissingElement { selector: String },
    /// A DOM call threw (attribute write, node creation, listener binding).
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The configuration payload could not be decoded.
    #[error("failed to decode drawer config: {0}")]
    Config(String),
    /// The configuration decoded but holds unusable values.
    #[error("invalid drawer config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for DrawerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
