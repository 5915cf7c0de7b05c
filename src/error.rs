use thiserror::Error;

/// Which corner of a Bounds3 an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    V1,
    V2,
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corner::V1 => write!(f, "v1"),
            Corner::V2 => write!(f, "v2"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("corner {which} must be a 3D vector, got {len} components")]
    InvalidCorner { which: Corner, len: usize },

    #[error("corner {which} has non-finite components")]
    NonFiniteCorner { which: Corner },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
