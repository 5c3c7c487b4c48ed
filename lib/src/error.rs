use thiserror::Error;

/// A turn snapshot that could not be turned into a [`crate::Turn`].
///
/// Failures are scoped to the one turn being decoded; nothing is retained between calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

impl SnapshotError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        SnapshotError::Malformed(reason.into())
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Malformed(e.to_string())
    }
}

impl From<simd_json::Error> for SnapshotError {
    fn from(e: simd_json::Error) -> Self {
        SnapshotError::Malformed(e.to_string())
    }
}

/// An unknown name for a strategy, legality rule or direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct PolicyParseError {
    pub kind: &'static str,
    pub value: String,
}

impl PolicyParseError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
