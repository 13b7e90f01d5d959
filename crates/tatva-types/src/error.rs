use thiserror::Error;

/// Errors related to the search session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("capsule index {index} out of range (session holds {len})")]
    OutOfRange { index: usize, len: usize },
}

/// A coordinate that cannot take part in geometric computation.
///
/// Always absorbed by the caller: the offending hub or property is skipped
/// for bounding boxes and overlays but stays in list views.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("coordinate missing")]
    Missing,

    #[error("unparsable coordinate: '{0}'")]
    Unparsable(String),

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("{axis} {value} outside [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("inverted bounds: min {min} > max {max}")]
    InvertedBounds { min: f64, max: f64 },
}

/// Errors raised by a mapping provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map provider error: {0}")]
    Provider(String),

    #[error("unknown overlay handle {0}")]
    UnknownOverlay(u64),

    #[error("map state poisoned")]
    Poisoned,
}

/// Errors from the chat backend boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    Transport(String),

    #[error("chat backend returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
