use serde::Serialize;
use thiserror::Error;

/// Failures visible to the caller of a catalog, meta or manifest request.
#[derive(Debug, Error)]
pub enum AddonError {
    /// A credential or setting the request needs is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// An upstream service failed on a call whose result cannot be defaulted.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl AddonError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Upstream(_) => "upstream_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 400,
            Self::NotFound(_) => 404,
            Self::BadRequest(_) => 400,
            Self::Upstream(_) => 502,
        }
    }
}

/// Body a serving layer returns for a failed addon call.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable kind, see [`AddonError::code`].
    pub code: &'static str,
    /// Human-readable cause, including the failing catalog or id.
    pub message: String,
    /// `{"status": <http status>}`.
    pub details: serde_json::Value,
}

impl From<&AddonError> for ErrorEnvelope {
    fn from(err: &AddonError) -> Self {
        let mut details = serde_json::Map::new();
        details.insert("status".into(), err.status_code().into());
        Self {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
                details: details.into(),
            },
        }
    }
}
