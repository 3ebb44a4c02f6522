//! Reference linking: name → handle for every cross-entity reference.
//!
//! Linking runs against the closed symbol table, so forward references
//! resolve exactly like backward ones. A reference that cannot be linked
//! stays in place, unresolved, with one diagnostic scoped to its field.

use super::error::ResolveError;
use super::ids::{DefId, map_ids};
use super::resolved::{ExpandPath, Reference, ResolvedChild, ResolvedTarget};
use super::symbol_table::SymbolTable;
use crate::base::Name;
use crate::base::constants::EXPAND_SEPARATORS;
use crate::config::LoadOptions;
use crate::syntax::{Definition, DefinitionKind, TargetSpec};

const TYPE: &[DefinitionKind] = &[DefinitionKind::Type];
const NAVIGABLE: &[DefinitionKind] = &[DefinitionKind::Command, DefinitionKind::Menu];

/// Linked references of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub children: Vec<ResolvedChild>,
    pub target: Option<ResolvedTarget>,
    /// Type link of each declared attribute, parallel to `attributes`.
    pub type_links: Vec<Option<Reference>>,
}

struct Linker<'a> {
    table: &'a SymbolTable,
    subject: &'a Definition,
    options: &'a LoadOptions,
    errors: Vec<ResolveError>,
}

impl<'a> Linker<'a> {
    fn link(
        &mut self,
        name: &Name,
        field: impl Into<String>,
        accepts: &[DefinitionKind],
        expected: &'static str,
    ) -> Reference {
        let Some(id) = self.table.lookup(name) else {
            self.errors.push(ResolveError::UnresolvedReference {
                name: self.subject.name.clone(),
                field: field.into(),
                target: name.clone(),
            });
            return Reference::unresolved(name.clone());
        };

        let found = self.table[id].kind;
        if accepts.contains(&found) {
            Reference::resolved(name.clone(), id)
        } else {
            self.errors.push(ResolveError::TypeMismatch {
                name: self.subject.name.clone(),
                field: field.into(),
                target: name.clone(),
                expected,
                found,
            });
            Reference::unresolved(name.clone())
        }
    }

    fn link_children(&mut self) -> Vec<ResolvedChild> {
        let subject = self.subject;
        subject
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                let field = format!("children[{i}]");
                let reference = self.link(&child.name, field.clone(), NAVIGABLE, "Command or Menu");
                if self.options.check_child_ref_kinds {
                    if let Some(id) = reference.target {
                        let found = self.table[id].kind;
                        if found != child.kind.expected_kind() {
                            self.errors.push(ResolveError::ChildRefKindMismatch {
                                name: subject.name.clone(),
                                field,
                                target: child.name.clone(),
                                declared: child.kind,
                                found,
                            });
                        }
                    }
                }
                ResolvedChild {
                    declared: child.kind,
                    reference,
                }
            })
            .collect()
    }

    fn link_target(&mut self, spec: &TargetSpec) -> ResolvedTarget {
        let query_types = spec
            .query_types
            .iter()
            .enumerate()
            .map(|(i, name)| self.link(name, format!("target.queryTypes[{i}]"), TYPE, "Type"))
            .collect();

        let expand = spec.expand.as_ref().map(|raw| {
            let (head, tail) = split_expand(raw);
            ExpandPath {
                raw: raw.clone(),
                head: self.link(&Name::new(head), "target.expand", TYPE, "Type"),
                tail: tail.to_string(),
            }
        });

        ResolvedTarget {
            target: spec.target.clone(),
            mode: spec.mode.clone(),
            query_types,
            expand,
            table: spec.table.as_ref().map(|name| {
                self.link(name, "target.table", &[DefinitionKind::Table], "Table")
            }),
            form: spec.form.as_ref().map(|name| {
                self.link(name, "target.form", &[DefinitionKind::Form], "Form")
            }),
            menu: spec.menu.as_ref().map(|name| {
                self.link(name, "target.menu", &[DefinitionKind::Menu], "Menu")
            }),
        }
    }

    fn link_type_links(&mut self) -> Vec<Option<Reference>> {
        let subject = self.subject;
        subject
            .attributes
            .iter()
            .map(|attr| {
                let field = format!("attributes.{}.typeLink", attr.name);
                match &attr.type_link {
                    Some(link) => Some(self.link(link, field, TYPE, "Type")),
                    None => {
                        if attr.is_link() {
                            self.errors.push(ResolveError::MissingTypeLink {
                                name: subject.name.clone(),
                                attribute: attr.name.clone(),
                            });
                        }
                        None
                    }
                }
            })
            .collect()
    }
}

/// Split an expand path after its leading type segment.
///
/// `Sales_Invoice\Contact` → (`Sales_Invoice`, `\Contact`)
pub fn split_expand(raw: &str) -> (&str, &str) {
    match raw.find(EXPAND_SEPARATORS) {
        Some(at) => raw.split_at(at),
        None => (raw, ""),
    }
}

/// Link every reference of one entity.
pub fn link_entity(
    table: &SymbolTable,
    id: DefId,
    options: &LoadOptions,
) -> (Links, Vec<ResolveError>) {
    let subject = &table[id];
    let mut linker = Linker {
        table,
        subject,
        options,
        errors: Vec::new(),
    };

    let links = Links {
        children: linker.link_children(),
        target: subject.target.as_ref().map(|spec| linker.link_target(spec)),
        type_links: linker.link_type_links(),
    };
    (links, linker.errors)
}

/// Link every entity of a table. Indexed by handle.
pub fn link_all(
    table: &SymbolTable,
    options: &LoadOptions,
) -> (Vec<Links>, Vec<(DefId, ResolveError)>) {
    let ids: Vec<DefId> = table.ids().collect();
    let outcomes = map_ids(&ids, options.parallel, |id| link_entity(table, id, options));

    let mut links = Vec::with_capacity(ids.len());
    let mut errors = Vec::new();
    for (id, (entity_links, errs)) in ids.into_iter().zip(outcomes) {
        links.push(entity_links);
        errors.extend(errs.into_iter().map(|e| (id, e)));
    }

    tracing::debug!(entities = links.len(), errors = errors.len(), "references linked");
    (links, errors)
}
