//! Error types.
//!
//! None of these abort a generation pass on their own: the collector reports
//! [`ConfigurationError`]s as diagnostics and degrades, and the host decides
//! what a [`RenderError`] means for the configuration type being processed.

use thiserror::Error;

/// A malformed declaration that the collector worked around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `PREFIX_` exists but is not a compile-time constant string.
    #[error(
        "PREFIX_ field of `{type_name}` is not a compile-time constant string \
         (`{expression}`); attribute ids are not prefixed"
    )]
    NonConstantPrefix {
        /// Simple name of the configuration type.
        type_name: String,
        /// The offending initializer.
        expression: String,
    },
}

/// A value type spelling that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTypeError {
    /// Blank type name.
    #[error("value type name is empty")]
    Empty,
    /// More than one array dimension.
    #[error("`{0}` has more than one array dimension")]
    MultiDimensional(String),
}

/// Failure while rendering the metadata document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The XML writer rejected an event.
    #[error("failed to write XML: {0}")]
    Xml(String),
    /// The rendered bytes are not UTF-8.
    #[error("rendered XML is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
