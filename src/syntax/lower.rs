//! Lowering: statement list → [`Definition`].
//!
//! Lowering only reshapes data. It never looks at other definitions, so it
//! can run before the symbol table exists.

use thiserror::Error;
use uuid::Uuid;

use crate::base::Name;
use crate::base::constants::{
    PROP_TARGET, PROP_TARGET_EXPAND, PROP_TARGET_MODE, PROP_TARGET_QUERY_TYPES,
};

use super::{
    AttributeBlock, AttributeDefinition, AttributeStatement, AttributeType, ChildDecl, Definition,
    DefinitionBlock, DefinitionKind, Statement, TargetSpec,
};

/// A statement that could not be applied to its definition. The statement is
/// skipped; the rest of the definition is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("'{statement}' is not allowed in a {kind} definition")]
    NotAllowed {
        statement: &'static str,
        kind: DefinitionKind,
    },

    #[error("'{statement}' is declared more than once; keeping the first value")]
    Repeated { statement: &'static str },

    #[error("attribute '{attribute}': '{statement}' is declared more than once; keeping the first value")]
    RepeatedAttributeField {
        attribute: Name,
        statement: &'static str,
    },

    #[error("invalid UUID '{value}': {reason}")]
    InvalidUuid { value: String, reason: String },
}

/// Lower one block into a definition record.
///
/// `query_type_separator` splits the `TargetQueryTypes` property.
pub fn lower_block(
    block: &DefinitionBlock,
    query_type_separator: char,
) -> (Definition, Vec<StatementError>) {
    let kind = block.kind;
    let mut def = Definition::new(kind, block.name.clone());
    def.origin = block.origin;

    let mut errors = Vec::new();
    let mut target = TargetSpec::default();

    for statement in &block.statements {
        if !allowed(kind, statement) {
            errors.push(StatementError::NotAllowed {
                statement: statement.keyword(),
                kind,
            });
            continue;
        }

        match statement {
            Statement::SetUuid(raw) => match Uuid::parse_str(raw.trim()) {
                Ok(uuid) => set_once(&mut def.uuid, uuid, statement, &mut errors),
                Err(e) => errors.push(StatementError::InvalidUuid {
                    value: raw.clone(),
                    reason: e.to_string(),
                }),
            },
            Statement::SetParentType(parent) => {
                set_once(&mut def.parent, parent.clone(), statement, &mut errors)
            }
            Statement::AddProperty { key, value } => {
                // A repeated key keeps its first position and takes the new value
                def.properties.insert(key.clone(), value.clone());
            }
            Statement::AddAttribute(block) => {
                def.attributes.push(lower_attribute(block, &mut errors));
            }
            Statement::AddIcon(icon) => {
                set_once(&mut def.icon, icon.clone(), statement, &mut errors)
            }
            Statement::AddTargetTable(name) => {
                set_once(&mut target.table, name.clone(), statement, &mut errors)
            }
            Statement::AddTargetForm(name) => {
                set_once(&mut target.form, name.clone(), statement, &mut errors)
            }
            Statement::AddTargetMenu(name) => {
                set_once(&mut target.menu, name.clone(), statement, &mut errors)
            }
            Statement::AddChild { kind, name } => def.children.push(ChildDecl {
                kind: *kind,
                name: name.clone(),
            }),
        }
    }

    if kind.is_navigable() {
        apply_target_properties(&def, &mut target, query_type_separator);
        if !target.is_empty() {
            def.target = Some(target);
        }
    }

    (def, errors)
}

fn allowed(kind: DefinitionKind, statement: &Statement) -> bool {
    match statement {
        Statement::SetUuid(_) | Statement::AddProperty { .. } | Statement::AddIcon(_) => true,
        Statement::SetParentType(_) | Statement::AddAttribute(_) => kind == DefinitionKind::Type,
        Statement::AddTargetTable(_)
        | Statement::AddTargetForm(_)
        | Statement::AddTargetMenu(_)
        | Statement::AddChild { .. } => kind.is_navigable(),
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    statement: &Statement,
    errors: &mut Vec<StatementError>,
) {
    if slot.is_some() {
        errors.push(StatementError::Repeated {
            statement: statement.keyword(),
        });
    } else {
        *slot = Some(value);
    }
}

fn lower_attribute(block: &AttributeBlock, errors: &mut Vec<StatementError>) -> AttributeDefinition {
    let mut attr = AttributeDefinition::new(block.name.clone());
    let owner = &block.name;

    for statement in &block.statements {
        match statement {
            AttributeStatement::SetAttributeType(tag) => set_field(
                &mut attr.attribute_type,
                AttributeType::from_tag(tag),
                (owner, "setAttributeType"),
                errors,
            ),
            AttributeStatement::SetSqlTable(table) => set_field(
                &mut attr.sql_table,
                table.clone(),
                (owner, "setSQLTable"),
                errors,
            ),
            AttributeStatement::SetSqlColumn(column) => set_field(
                &mut attr.sql_column,
                column.clone(),
                (owner, "setSQLColumn"),
                errors,
            ),
            AttributeStatement::SetTypeLink(link) => set_field(
                &mut attr.type_link,
                link.clone(),
                (owner, "setTypeLink"),
                errors,
            ),
        }
    }

    attr
}

fn set_field<T>(
    slot: &mut Option<T>,
    value: T,
    (attribute, statement): (&Name, &'static str),
    errors: &mut Vec<StatementError>,
) {
    if slot.is_some() {
        errors.push(StatementError::RepeatedAttributeField {
            attribute: attribute.clone(),
            statement,
        });
    } else {
        *slot = Some(value);
    }
}

fn apply_target_properties(def: &Definition, target: &mut TargetSpec, separator: char) {
    target.target = def.property(PROP_TARGET).map(str::to_string);
    target.mode = def.property(PROP_TARGET_MODE).map(str::to_string);
    target.expand = def
        .property(PROP_TARGET_EXPAND)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    if let Some(raw) = def.property(PROP_TARGET_QUERY_TYPES) {
        target.query_types = raw
            .split(separator)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Name::new)
            .collect();
    }
}
