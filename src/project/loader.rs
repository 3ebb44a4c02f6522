//! Loading: sources → parsed blocks → resolved graph.

use std::path::Path;

use rayon::prelude::*;

use crate::base::{Name, Origin};
use crate::config::LoadOptions;
use crate::hir::{DiagnosticCollector, LoadResult, ResolveError, resolve_with};
use crate::parser::{Parse, ParseError, parse};

use super::error::LoadError;
use super::source_set::{Source, SourceSet, has_accepted_extension};

/// Parse every source and resolve the definitions they contain.
///
/// Sources are parsed in parallel (when enabled) and registered in set
/// order. Syntax errors are reported against the source and never stop the
/// load.
pub fn load(sources: &SourceSet, options: &LoadOptions) -> LoadResult {
    let parses: Vec<Parse> = if options.parallel {
        sources
            .iter()
            .collect::<Vec<_>>()
            .par_iter()
            .map(|source| parse_source(source))
            .collect()
    } else {
        sources.iter().map(parse_source).collect()
    };

    let mut diagnostics = DiagnosticCollector::new();
    let mut blocks = Vec::new();
    for (source, parsed) in sources.iter().zip(parses) {
        for error in parsed.errors {
            diagnostics.report(
                syntax_error(&source.name, &error),
                Some(Origin::new(source.id, error.span())),
            );
        }
        blocks.extend(parsed.blocks);
    }

    tracing::debug!(
        sources = sources.len(),
        blocks = blocks.len(),
        syntax_errors = diagnostics.len(),
        "sources parsed"
    );
    resolve_with(blocks, diagnostics, options)
}

/// Load a single in-memory text.
pub fn load_text(name: &str, text: &str, options: &LoadOptions) -> LoadResult {
    let mut sources = SourceSet::new();
    sources.add_text(name, text);
    load(&sources, options)
}

/// Load a definition file, or every definition file below a directory.
pub fn load_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadResult, LoadError> {
    let path = path.as_ref();
    let mut sources = SourceSet::new();
    if path.is_dir() {
        sources.add_directory(path, options)?;
    } else if has_accepted_extension(path, options) {
        sources.add_file(path)?;
    } else if path.exists() {
        return Err(LoadError::UnsupportedExtension(path.to_path_buf()));
    } else {
        return Err(LoadError::io(
            path,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }
    Ok(load(&sources, options))
}

fn parse_source(source: &Source) -> Parse {
    let _span = tracing::debug_span!("parse", source = %source.name).entered();
    parse(source.id, &source.text)
}

fn syntax_error(source: &Name, error: &ParseError) -> ResolveError {
    if error.is_statement_error() {
        ResolveError::InvalidStatement {
            name: source.clone(),
            message: error.to_string(),
        }
    } else {
        ResolveError::Syntax {
            name: source.clone(),
            message: error.to_string(),
        }
    }
}
