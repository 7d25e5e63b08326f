//! Error types for the site UI controller.

/// Failures surfaced while wiring or driving a UI feature.
///
/// Apart from [`UiError::InvalidConfig`], none of these abort controller
/// construction: they disable the one feature that hit them.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum UiError {
    /// A selector the feature depends on matched nothing.
    #[error("{feature}: no element matches `{selector}`")]
    MissingElement {
        feature: &'static str,
        selector: String,
    },

    /// A third-party library global is not loaded on the page.
    #[error("library `{name}` is not available")]
    MissingLibrary { name: String },

    /// The host threw while executing a call on our behalf.
    #[error("host error: {message}")]
    Host { message: String },

    /// Configuration values that cannot drive the controller.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl UiError {
    pub fn missing(feature: &'static str, selector: impl Into<String>) -> Self {
        Self::MissingElement {
            feature,
            selector: selector.into(),
        }
    }

    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Whether the error only disables a single feature.
    #[inline]
    pub fn is_feature_local(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }
}

pub type Result<T> = std::result::Result<T, UiError>;
