//! ConfigHost: holds the current load and swaps in reloads atomically.
//!
//! ## Usage
//!
//! ```ignore
//! let host = ConfigHost::new(LoadOptions::default());
//! host.reload(&sources);
//!
//! // Readers take a snapshot; a concurrent reload never changes it
//! let snapshot = host.snapshot();
//! let main = snapshot.get("Main_Menu");
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::config::LoadOptions;
use crate::hir::LoadResult;

use super::loader::load;
use super::source_set::SourceSet;

/// Owns the published [`LoadResult`].
///
/// A reload builds a complete new result first and publishes it with one
/// pointer swap, so a reader sees either the old graph or the new one, never
/// a mix.
pub struct ConfigHost {
    options: LoadOptions,
    current: RwLock<Arc<LoadResult>>,
    /// Serializes reloads; readers never take it.
    reloading: Mutex<()>,
    generation: AtomicU64,
}

impl Default for ConfigHost {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

impl ConfigHost {
    /// Create a host with an empty published result.
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            current: RwLock::new(Arc::new(LoadResult::default())),
            reloading: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// The currently published result.
    pub fn snapshot(&self) -> Arc<LoadResult> {
        Arc::clone(&self.current.read())
    }

    /// Number of results published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Load `sources` and publish the result.
    pub fn reload(&self, sources: &SourceSet) -> Arc<LoadResult> {
        let _guard = self.reloading.lock();
        let result = Arc::new(load(sources, &self.options));
        self.publish(Arc::clone(&result));
        result
    }

    /// Publish an already built result.
    pub fn publish(&self, result: Arc<LoadResult>) {
        *self.current.write() = result;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::info!(generation, "load result published");
    }
}
