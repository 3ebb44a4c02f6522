//! Entity handles.

use rayon::prelude::*;

/// Handle of a registered definition: its index in the symbol table arena.
///
/// Handles are only meaningful for the table (and resolved graph) that
/// issued them. Ordering follows registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DefId(u32);

impl DefId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Run `f` for every handle, on the rayon pool when `parallel` is set.
///
/// Output order always matches `ids`, so results stay deterministic.
pub(crate) fn map_ids<T, F>(ids: &[DefId], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(DefId) -> T + Sync + Send,
{
    if parallel {
        ids.par_iter().map(|&id| f(id)).collect()
    } else {
        ids.iter().map(|&id| f(id)).collect()
    }
}
