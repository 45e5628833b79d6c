use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Result;

/// Where a serialized corpus artifact comes from.
#[derive(Debug, Clone)]
pub enum ArtifactSource {
    /// A file on disk, read on first load
    Path(PathBuf),
    /// Bytes already in memory (bundled, or fetched by the host page)
    Bytes(Arc<[u8]>),
}

impl ArtifactSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(bytes.into())
    }

    pub(crate) fn read(&self) -> Result<Arc<[u8]>> {
        match self {
            Self::Path(path) => Ok(std::fs::read(path)?.into()),
            Self::Bytes(bytes) => Ok(Arc::clone(bytes)),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<&str> for ArtifactSource {
    fn from(json: &str) -> Self {
        Self::bytes(json.as_bytes())
    }
}

/// A store that can be parsed from a serialized artifact.
pub trait Artifact: Sized {
    /// Short name used in load logs
    const KIND: &'static str;

    fn parse(bytes: &[u8]) -> Result<Self>;

    /// Number of entries, for load logs
    fn entries(&self) -> usize;

    /// Vector width, for artifacts that carry vectors
    fn dimension(&self) -> Option<usize> {
        None
    }
}
