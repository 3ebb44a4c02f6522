//! Shared test helpers

pub mod source_fixtures;
