//! Ordered collections of definition sources.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::base::{Name, SourceId};
use crate::config::LoadOptions;

use super::error::LoadError;

/// One input: a file or an in-memory text.
#[derive(Debug, Clone)]
pub struct Source {
    pub id: SourceId,
    /// Display name: the path for files, the given name otherwise.
    pub name: Name,
    pub path: Option<PathBuf>,
    pub text: Arc<str>,
}

/// Sources in load order. Load order decides which of two same-named
/// definitions wins, so directory contents are added in sorted path order.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: Vec<Source>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an in-memory source.
    pub fn add_text(&mut self, name: impl Into<Name>, text: impl Into<Arc<str>>) -> SourceId {
        let id = SourceId::new(self.sources.len() as u32);
        self.sources.push(Source {
            id,
            name: name.into(),
            path: None,
            text: text.into(),
        });
        id
    }

    /// Read and add one file, whatever its extension.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<SourceId, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let id = self.add_text(path.display().to_string(), text);
        self.sources[id.index()].path = Some(path.to_path_buf());
        Ok(id)
    }

    /// Add every file below `dir` whose extension `options` accepts.
    ///
    /// Returns the number of files added.
    pub fn add_directory(
        &mut self,
        dir: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<usize, LoadError> {
        let paths = collect_file_paths(dir.as_ref(), options)?;
        for path in &paths {
            self.add_file(path)?;
        }
        tracing::debug!(dir = %dir.as_ref().display(), files = paths.len(), "directory added");
        Ok(paths.len())
    }

    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a Source;
    type IntoIter = std::slice::Iter<'a, Source>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.iter()
    }
}

/// Collect the definition files below `dir`, recursively, in sorted order.
///
/// Symlinked files are read; symlinked directories are not descended into.
pub fn collect_file_paths(dir: &Path, options: &LoadOptions) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = std::fs::read_dir(&current).map_err(|e| LoadError::io(&current, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::io(&current, e))?;
            let file_type = entry.file_type().map_err(|e| LoadError::io(entry.path(), e))?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_symlink() && path.is_dir() {
                // Linked directories can loop back on themselves
                tracing::debug!(path = %path.display(), "skipping symlinked directory");
            } else if has_accepted_extension(&path, options) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

pub(crate) fn has_accepted_extension(path: &Path, options: &LoadOptions) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| options.accepts_extension(ext))
}
