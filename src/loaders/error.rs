//! Asset loading errors.

use thiserror::Error;

/// Why an asset could not be loaded or looked up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The source has nothing at this url.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// Transport failure while fetching.
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// Requested url.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// Bytes arrived but could not be decoded.
    #[error("failed to decode {url}: {reason}")]
    Decode {
        /// Requested url.
        url: String,
        /// Decoder message.
        reason: String,
    },

    /// Named lookup inside a loaded model failed.
    #[error("no node named `{0}` in loaded model")]
    MissingNode(String),

    /// A batch or model has no asset under this key.
    #[error("no asset named `{0}`")]
    MissingAsset(String),

    /// Two requests in one batch share a key.
    #[error("duplicate asset key `{0}`")]
    DuplicateKey(String),

    /// The asset under a key is of another kind.
    #[error("asset `{key}` is {found}, expected {expected}")]
    KindMismatch {
        /// Batch key.
        key: String,
        /// Kind the caller asked for.
        expected: &'static str,
        /// Kind actually loaded.
        found: &'static str,
    },

    /// A cube face is not square or differs in size from the first face.
    #[error("cube face {face} is {width}x{height}, expected {expected}x{expected}")]
    FaceSize {
        /// Face index, in +x, -x, +y, -y, +z, -z order.
        face: usize,
        /// Face width.
        width: u32,
        /// Face height.
        height: u32,
        /// Required edge length.
        expected: u32,
    },
}

impl LoadError {
    pub(crate) fn decode(url: &str, reason: impl ToString) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
