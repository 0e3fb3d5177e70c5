use thiserror::Error;

/// Result type alias for frustum queries
pub type Result<T> = std::result::Result<T, FrustumError>;

/// Errors raised by frustum construction and queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrustumError {
    #[error("planes {first}, {second} and {third} do not converge to a single point")]
    PlanesDoNotConverge {
        first: &'static str,
        second: &'static str,
        third: &'static str,
    },

    #[error("unsupported query: {0}")]
    Unsupported(&'static str),

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}
