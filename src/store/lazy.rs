use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::Result;
use super::artifact::{Artifact, ArtifactSource};

/// A store parsed on first use and shared for the rest of the session.
///
/// `load` is idempotent: after the first successful parse every call hands
/// back the same `Arc` without touching the source again. A failed parse is
/// not cached, so a later call retries.
#[derive(Debug)]
pub struct LazyStore<S> {
    source: ArtifactSource,
    cell: OnceCell<Arc<S>>,
}

impl<S: Artifact> LazyStore<S> {
    pub fn new(source: ArtifactSource) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already-built store (tests, or corpora assembled in code).
    pub fn preloaded(store: S) -> Self {
        Self {
            source: ArtifactSource::bytes(Vec::new()),
            cell: OnceCell::with_value(Arc::new(store)),
        }
    }

    pub fn load(&self) -> Result<Arc<S>> {
        self.cell
            .get_or_try_init(|| {
                let bytes = self.source.read()?;
                let store = S::parse(&bytes)?;
                tracing::info!(
                    kind = S::KIND,
                    entries = store.entries(),
                    dimension = ?store.dimension(),
                    source = %self.source.describe(),
                    "loaded corpus artifact"
                );
                Ok(Arc::new(store))
            })
            .map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
