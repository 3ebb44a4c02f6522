//! Resolved entity model.
//!
//! These are the records a load hands back. Every cross-entity link is a
//! [`Reference`]: the declared name plus the handle it resolved to, if any.

use indexmap::IndexMap;
use uuid::Uuid;

use super::ids::DefId;
use crate::base::{Name, Origin};
use crate::syntax::{AttributeType, ChildKind, DefinitionKind};

/// A by-name link to another entity.
///
/// A reference whose target could not be found (or had the wrong kind) keeps
/// its name and has no target; the entity holding it stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub name: Name,
    pub target: Option<DefId>,
}

impl Reference {
    pub fn resolved(name: impl Into<Name>, target: DefId) -> Self {
        Self {
            name: name.into(),
            target: Some(target),
        }
    }

    /// A reference that did not resolve.
    pub fn unresolved(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}

/// An attribute in a type's effective attribute set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAttribute {
    /// The type that declared the attribute (the type itself or an ancestor).
    pub owner: DefId,
    pub name: Name,
    pub attribute_type: Option<AttributeType>,
    pub sql_table: Option<Name>,
    pub sql_column: Option<Name>,
    pub type_link: Option<Reference>,
}

/// One entry of a menu's (or command's) child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChild {
    /// Declared as `CommandRef` or `MenuRef`.
    pub declared: ChildKind,
    pub reference: Reference,
}

/// The `TargetExpand` path. Only the head segment names an entity; the
/// tail is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandPath {
    pub raw: String,
    pub head: Reference,
    pub tail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedTarget {
    pub target: Option<String>,
    pub mode: Option<String>,
    pub query_types: Vec<Reference>,
    pub expand: Option<ExpandPath>,
    pub table: Option<Reference>,
    pub form: Option<Reference>,
    pub menu: Option<Reference>,
}

/// A fully resolved entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub id: DefId,
    pub kind: DefinitionKind,
    pub name: Name,
    pub uuid: Option<Uuid>,
    pub icon: Option<Name>,
    /// Declared parent type (types only).
    pub parent: Option<Reference>,
    /// Ancestor chain, self first and root last.
    ///
    /// `None` for non-types and for types that sit on, or run into, an
    /// inheritance cycle. A chain cut short by a missing parent ends at the
    /// last type that could be found.
    pub ancestors: Option<Vec<DefId>>,
    /// Effective properties: the closest declaration of each key wins.
    ///
    /// `None` when the ancestor chain is unavailable.
    pub properties: Option<IndexMap<Name, String>>,
    /// Effective attributes, root-most ancestor first. For a type without an
    /// ancestor chain this is its own declared attributes.
    pub attributes: Vec<ResolvedAttribute>,
    /// Children in declaration order.
    pub children: Vec<ResolvedChild>,
    pub target: Option<ResolvedTarget>,
    /// Part of a menu graph cycle; excluded from tree expansion.
    pub cyclic: bool,
    pub origin: Option<Origin>,
}

impl ResolvedEntity {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    /// Handles of the children that resolved, in declaration order.
    pub fn child_ids(&self) -> impl Iterator<Item = DefId> + '_ {
        self.children.iter().filter_map(|c| c.reference.target)
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.reference.name.as_str())
    }
}
