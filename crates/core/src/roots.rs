//! Source root index.
//!
//! Per-container mapping from root kind to root locations. Rebuilt on every
//! reconciliation pass; lookups report stale roots instead of guessing so the
//! facet can rebuild once and retry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use marx_platform_protocol::{ModuleContainer, SourceType};

/// Marker error: a recorded root no longer exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleRoots;

#[derive(Debug, Default)]
pub struct SourceRootIndex {
    roots: HashMap<SourceType, Vec<PathBuf>>,
}

impl SourceRootIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop and re-read all roots from the container.
    pub fn rebuild(&mut self, container: &dyn ModuleContainer) {
        self.roots.clear();
        for (kind, path) in container.source_roots() {
            self.roots.entry(kind).or_default().push(path);
        }
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    #[must_use]
    pub fn roots_of(&self, kind: SourceType) -> &[PathBuf] {
        self.roots.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Look up `path` among the root locations of the requested kind.
    ///
    /// # Errors
    ///
    /// Returns [`StaleRoots`] when a recorded root no longer exists, so the
    /// caller can rebuild the index and retry.
    pub fn find_file(&self, path: &Path, kind: SourceType) -> Result<Option<PathBuf>, StaleRoots> {
        for root in self.roots_of(kind) {
            if !root.is_dir() {
                return Err(StaleRoots);
            }
            let candidate = root.join(path);
            if candidate.exists() {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }
}
