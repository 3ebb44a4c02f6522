use indexmap::IndexMap;
use uuid::Uuid;

use crate::base::{Name, Origin};

use super::{ChildKind, DefinitionKind};

/// A lowered definition record: every field still holds names, nothing is
/// linked yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: Name,
    pub kind: DefinitionKind,
    pub uuid: Option<Uuid>,
    /// Parent type name (Type only).
    pub parent: Option<Name>,
    /// Declared properties in declaration order.
    pub properties: IndexMap<Name, String>,
    /// Declared attributes (Type only).
    pub attributes: Vec<AttributeDefinition>,
    /// Declared children in display order (Command/Menu only).
    pub children: Vec<ChildDecl>,
    pub icon: Option<Name>,
    pub target: Option<TargetSpec>,
    pub origin: Option<Origin>,
}

impl Definition {
    pub fn new(kind: DefinitionKind, name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            kind,
            uuid: None,
            parent: None,
            properties: IndexMap::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            icon: None,
            target: None,
            origin: None,
        }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// A declared child reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildDecl {
    pub kind: ChildKind,
    pub name: Name,
}

/// Storage kind of an attribute.
///
/// Unknown tags are kept verbatim in [`AttributeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Integer,
    Long,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Link,
    LinkWithRanges,
    Status,
    Type,
    OwnerLink,
    CreatorLink,
    Created,
    Modified,
    Other(Name),
}

impl AttributeType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "String" => AttributeType::String,
            "Integer" => AttributeType::Integer,
            "Long" => AttributeType::Long,
            "Decimal" => AttributeType::Decimal,
            "Boolean" => AttributeType::Boolean,
            "Date" => AttributeType::Date,
            "DateTime" => AttributeType::DateTime,
            "Link" => AttributeType::Link,
            "LinkWithRanges" => AttributeType::LinkWithRanges,
            "Status" => AttributeType::Status,
            "Type" => AttributeType::Type,
            "OwnerLink" => AttributeType::OwnerLink,
            "CreatorLink" => AttributeType::CreatorLink,
            "Created" => AttributeType::Created,
            "Modified" => AttributeType::Modified,
            other => AttributeType::Other(Name::new(other)),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            AttributeType::String => "String",
            AttributeType::Integer => "Integer",
            AttributeType::Long => "Long",
            AttributeType::Decimal => "Decimal",
            AttributeType::Boolean => "Boolean",
            AttributeType::Date => "Date",
            AttributeType::DateTime => "DateTime",
            AttributeType::Link => "Link",
            AttributeType::LinkWithRanges => "LinkWithRanges",
            AttributeType::Status => "Status",
            AttributeType::Type => "Type",
            AttributeType::OwnerLink => "OwnerLink",
            AttributeType::CreatorLink => "CreatorLink",
            AttributeType::Created => "Created",
            AttributeType::Modified => "Modified",
            AttributeType::Other(tag) => tag,
        }
    }

    /// Types whose values point at instances of another type and therefore
    /// require a `typeLink`.
    pub fn is_link(&self) -> bool {
        matches!(
            self,
            AttributeType::Link | AttributeType::LinkWithRanges | AttributeType::Status
        )
    }
}

/// SQL-backed field of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub name: Name,
    pub attribute_type: Option<AttributeType>,
    pub sql_table: Option<Name>,
    pub sql_column: Option<Name>,
    pub type_link: Option<Name>,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            attribute_type: None,
            sql_table: None,
            sql_column: None,
            type_link: None,
        }
    }

    pub fn is_link(&self) -> bool {
        self.attribute_type
            .as_ref()
            .is_some_and(AttributeType::is_link)
    }
}

/// What a command or menu opens when activated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetSpec {
    /// Target area, e.g. `content` or `popup`.
    pub target: Option<String>,
    /// Target mode, e.g. `view` or `edit`.
    pub mode: Option<String>,
    /// Types whose instances populate the view.
    pub query_types: Vec<Name>,
    /// Relation traversal such as `Sales_Invoice\Contact`.
    pub expand: Option<String>,
    pub table: Option<Name>,
    pub form: Option<Name>,
    pub menu: Option<Name>,
}

impl TargetSpec {
    pub fn is_empty(&self) -> bool {
        *self == TargetSpec::default()
    }
}
