//! Project layer tests
//!
//! Tests for loading sources from disk and publishing results through the
//! ConfigHost.

pub mod tests_host;
