//! Load options

use crate::base::constants::{DEFAULT_EXTENSION, DEFAULT_QUERY_TYPE_SEPARATOR};

/// Options controlling how definitions are loaded and resolved.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Run parsing and the per-entity resolution phases on the rayon pool.
    pub parallel: bool,
    /// Report a warning when `CommandRef(..)` names a menu or `MenuRef(..)`
    /// names a command.
    pub check_child_ref_kinds: bool,
    /// File extensions (without dot) picked up when loading a directory.
    pub extensions: Vec<String>,
    /// Separator between names in the `TargetQueryTypes` property.
    pub query_type_separator: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            check_child_ref_kinds: true,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            query_type_separator: DEFAULT_QUERY_TYPE_SEPARATOR,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_child_ref_kind_check(mut self, check: bool) -> Self {
        self.check_child_ref_kinds = check;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_query_type_separator(mut self, separator: char) -> Self {
        self.query_type_separator = separator;
        self
    }

    /// Whether a file extension (without dot) is one we load.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
