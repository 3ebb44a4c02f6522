use crate::base::{Name, Origin};

use super::{ChildKind, DefinitionKind};

/// One declarative statement inside a definition block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `setUUID("...")` - raw text, validated during lowering.
    SetUuid(String),
    /// `setParentType(name)`
    SetParentType(Name),
    /// `addProperty(key, value)`
    AddProperty { key: Name, value: String },
    /// `addAttribute(name) { ... }`
    AddAttribute(AttributeBlock),
    /// `addIcon(ref)`
    AddIcon(Name),
    /// `addTargetTable(name)`
    AddTargetTable(Name),
    /// `addTargetForm(name)`
    AddTargetForm(Name),
    /// `addTargetMenu(name)`
    AddTargetMenu(Name),
    /// `addChild(CommandRef(name))` / `addChild(MenuRef(name))`
    AddChild { kind: ChildKind, name: Name },
}

impl Statement {
    /// Statement keyword as written in definition files.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::SetUuid(_) => "setUUID",
            Statement::SetParentType(_) => "setParentType",
            Statement::AddProperty { .. } => "addProperty",
            Statement::AddAttribute(_) => "addAttribute",
            Statement::AddIcon(_) => "addIcon",
            Statement::AddTargetTable(_) => "addTargetTable",
            Statement::AddTargetForm(_) => "addTargetForm",
            Statement::AddTargetMenu(_) => "addTargetMenu",
            Statement::AddChild { .. } => "addChild",
        }
    }
}

/// Body of an `addAttribute(name) { ... }` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBlock {
    pub name: Name,
    pub statements: Vec<AttributeStatement>,
}

impl AttributeBlock {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            statements: Vec::new(),
        }
    }

    pub fn attribute_type(mut self, tag: impl Into<Name>) -> Self {
        self.statements
            .push(AttributeStatement::SetAttributeType(tag.into()));
        self
    }

    pub fn sql(mut self, table: impl Into<Name>, column: impl Into<Name>) -> Self {
        self.statements
            .push(AttributeStatement::SetSqlTable(table.into()));
        self.statements
            .push(AttributeStatement::SetSqlColumn(column.into()));
        self
    }

    pub fn type_link(mut self, target: impl Into<Name>) -> Self {
        self.statements
            .push(AttributeStatement::SetTypeLink(target.into()));
        self
    }
}

/// Statement inside an attribute body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeStatement {
    SetAttributeType(Name),
    SetSqlTable(Name),
    SetSqlColumn(Name),
    SetTypeLink(Name),
}

/// A raw definition as handed to the engine: kind, name and an ordered
/// statement list.
///
/// The builder methods mirror the statement forms so callers (and tests)
/// can assemble blocks without going through the textual syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionBlock {
    pub kind: DefinitionKind,
    pub name: Name,
    pub statements: Vec<Statement>,
    pub origin: Option<Origin>,
}

impl DefinitionBlock {
    pub fn new(kind: DefinitionKind, name: impl Into<Name>) -> Self {
        Self {
            kind,
            name: name.into(),
            statements: Vec::new(),
            origin: None,
        }
    }

    pub fn type_def(name: impl Into<Name>) -> Self {
        Self::new(DefinitionKind::Type, name)
    }

    pub fn command(name: impl Into<Name>) -> Self {
        Self::new(DefinitionKind::Command, name)
    }

    pub fn menu(name: impl Into<Name>) -> Self {
        Self::new(DefinitionKind::Menu, name)
    }

    pub fn table(name: impl Into<Name>) -> Self {
        Self::new(DefinitionKind::Table, name)
    }

    pub fn form(name: impl Into<Name>) -> Self {
        Self::new(DefinitionKind::Form, name)
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn uuid(self, uuid: impl Into<String>) -> Self {
        self.statement(Statement::SetUuid(uuid.into()))
    }

    pub fn parent(self, parent: impl Into<Name>) -> Self {
        self.statement(Statement::SetParentType(parent.into()))
    }

    pub fn property(self, key: impl Into<Name>, value: impl Into<String>) -> Self {
        self.statement(Statement::AddProperty {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn attribute(self, attribute: AttributeBlock) -> Self {
        self.statement(Statement::AddAttribute(attribute))
    }

    pub fn icon(self, icon: impl Into<Name>) -> Self {
        self.statement(Statement::AddIcon(icon.into()))
    }

    pub fn target_table(self, name: impl Into<Name>) -> Self {
        self.statement(Statement::AddTargetTable(name.into()))
    }

    pub fn target_form(self, name: impl Into<Name>) -> Self {
        self.statement(Statement::AddTargetForm(name.into()))
    }

    pub fn target_menu(self, name: impl Into<Name>) -> Self {
        self.statement(Statement::AddTargetMenu(name.into()))
    }

    pub fn child_command(self, name: impl Into<Name>) -> Self {
        self.statement(Statement::AddChild {
            kind: ChildKind::Command,
            name: name.into(),
        })
    }

    pub fn child_menu(self, name: impl Into<Name>) -> Self {
        self.statement(Statement::AddChild {
            kind: ChildKind::Menu,
            name: name.into(),
        })
    }
}
