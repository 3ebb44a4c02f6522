//! Property cascade and attribute accumulation along ancestor chains.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::error::ResolveError;
use super::ids::{DefId, map_ids};
use super::inheritance::Inheritance;
use super::symbol_table::SymbolTable;
use crate::base::Name;
use crate::syntax::DefinitionKind;

/// Points at one attribute declaration: `table[owner].attributes[index]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSlot {
    pub owner: DefId,
    pub index: usize,
}

/// Effective properties and attributes of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    /// Keys keep the position of their root-most declaration; values come
    /// from the closest one.
    pub properties: IndexMap<Name, String>,
    /// Root-most ancestor's attributes first.
    pub attributes: Vec<AttributeSlot>,
}

/// Cascade one type over its ancestor chain (self first, root last).
///
/// Only duplicates declared by `chain[0]` itself are reported, so a
/// duplicate on an ancestor is reported once, on that ancestor.
pub fn cascade_type(table: &SymbolTable, chain: &[DefId]) -> (Cascade, Vec<ResolveError>) {
    let mut cascade = Cascade::default();
    let mut errors = Vec::new();
    let Some(&subject) = chain.first() else {
        return (cascade, errors);
    };

    let mut declared_by: FxHashMap<&Name, DefId> = FxHashMap::default();
    for &owner in chain.iter().rev() {
        let def = &table[owner];
        for (key, value) in &def.properties {
            cascade.properties.insert(key.clone(), value.clone());
        }
        for (index, attr) in def.attributes.iter().enumerate() {
            match declared_by.get(&attr.name) {
                Some(&first) => {
                    if owner == subject {
                        errors.push(ResolveError::DuplicateAttribute {
                            name: def.name.clone(),
                            attribute: attr.name.clone(),
                            declared_by: table[first].name.clone(),
                        });
                    }
                }
                None => {
                    declared_by.insert(&attr.name, owner);
                    cascade.attributes.push(AttributeSlot { owner, index });
                }
            }
        }
    }

    (cascade, errors)
}

/// Cascade every type. Indexed by handle; `None` for non-types.
///
/// A type without an ancestor chain (on or behind an inheritance cycle) is
/// cascaded over itself alone, so its own duplicate attributes are still
/// reported and dropped.
pub fn cascade_all(
    table: &SymbolTable,
    inheritance: &Inheritance,
    parallel: bool,
) -> (Vec<Option<Cascade>>, Vec<(DefId, ResolveError)>) {
    let types = table.of_kind(DefinitionKind::Type);
    let outcomes = map_ids(types, parallel, |id| match inheritance.chain(id) {
        Some(chain) => cascade_type(table, chain),
        None => cascade_type(table, &[id]),
    });

    let mut cascades = vec![None; table.len()];
    let mut errors = Vec::new();
    for (&id, (cascade, errs)) in types.iter().zip(outcomes) {
        cascades[id.index()] = Some(cascade);
        errors.extend(errs.into_iter().map(|e| (id, e)));
    }

    tracing::debug!(types = types.len(), errors = errors.len(), "properties cascaded");
    (cascades, errors)
}
