//! Project loading: definition sources on disk or in memory.
//!
//! - [`SourceSet`] - ordered sources; order decides duplicate-name winners
//! - [`load`] / [`load_path`] / [`load_text`] - parse and resolve
//! - [`ConfigHost`] - publishes load results, with atomic reload

mod error;
mod host;
mod loader;
mod source_set;

pub use error::LoadError;
pub use host::ConfigHost;
pub use loader::{load, load_path, load_text};
pub use source_set::{Source, SourceSet, collect_file_paths};
