//! Domain constants shared by the parser, lowering and loader.

/// Default extension of definition files picked up by directory loading.
pub const DEFAULT_EXTENSION: &str = "ci";

/// Property key holding the target area (content, popup, ...).
pub const PROP_TARGET: &str = "Target";
/// Property key holding the target mode (view, edit, create, ...).
pub const PROP_TARGET_MODE: &str = "TargetMode";
/// Property key holding the separated list of query types.
pub const PROP_TARGET_QUERY_TYPES: &str = "TargetQueryTypes";
/// Property key holding the relation-traversal path.
pub const PROP_TARGET_EXPAND: &str = "TargetExpand";

/// Default separator between names in `TargetQueryTypes`.
pub const DEFAULT_QUERY_TYPE_SEPARATOR: char = ';';

/// Separators that end the leading type segment of an expand path.
pub const EXPAND_SEPARATORS: [char; 2] = ['\\', '.'];
