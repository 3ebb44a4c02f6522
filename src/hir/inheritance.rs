//! Inheritance resolution: ancestor chains for every type.
//!
//! Each type's chain is found by walking parent links with a visited set, so
//! a cycle is detected the moment a type repeats. Types are walked
//! independently of each other (and in parallel when enabled); the outcome
//! does not depend on registration order.
//!
//! | Situation                          | Chain            | Diagnostic                       |
//! |------------------------------------|------------------|----------------------------------|
//! | all parents found                  | self → root      | none                             |
//! | own parent missing / not a type    | `[self]`         | on self                          |
//! | an ancestor's parent missing       | self → ancestor  | none (reported on the ancestor)  |
//! | self on a cycle                    | none             | once per cycle, on lowest name   |
//! | self runs into a cycle             | none             | on self                          |

use rustc_hash::FxHashSet;

use super::error::ResolveError;
use super::ids::{DefId, map_ids};
use super::resolved::Reference;
use super::symbol_table::SymbolTable;
use crate::base::Name;
use crate::syntax::DefinitionKind;

/// Ancestor chains of all types of a table.
#[derive(Debug, Clone, Default)]
pub struct Inheritance {
    parents: Vec<Option<Reference>>,
    chains: Vec<Option<Vec<DefId>>>,
    errors: Vec<(DefId, ResolveError)>,
}

impl Inheritance {
    /// Ancestor chain of a type, self first. `None` for non-types and for
    /// types on or behind an inheritance cycle.
    pub fn chain(&self, id: DefId) -> Option<&[DefId]> {
        self.chains.get(id.index())?.as_deref()
    }

    pub fn parent(&self, id: DefId) -> Option<&Reference> {
        self.parents.get(id.index())?.as_ref()
    }

    /// Errors, grouped by type in registration order.
    pub fn errors(&self) -> &[(DefId, ResolveError)] {
        &self.errors
    }

    pub(crate) fn take_errors(&mut self) -> Vec<(DefId, ResolveError)> {
        std::mem::take(&mut self.errors)
    }
}

struct TypeOutcome {
    parent: Option<Reference>,
    chain: Option<Vec<DefId>>,
    errors: Vec<ResolveError>,
}

enum Walk {
    /// Reached a root, or stopped at a parent that could not be used.
    Chain(Vec<DefId>),
    /// Members of the cycle that was hit, in parent-link order.
    Cycle(Vec<DefId>),
}

/// Resolve the ancestor chain of every type in `table`.
pub fn resolve_inheritance(table: &SymbolTable, parallel: bool) -> Inheritance {
    let types = table.of_kind(DefinitionKind::Type);
    let outcomes = map_ids(types, parallel, |id| resolve_type(table, id));

    let mut inheritance = Inheritance {
        parents: vec![None; table.len()],
        chains: vec![None; table.len()],
        errors: Vec::new(),
    };
    for (&id, outcome) in types.iter().zip(outcomes) {
        inheritance.parents[id.index()] = outcome.parent;
        inheritance.chains[id.index()] = outcome.chain;
        inheritance
            .errors
            .extend(outcome.errors.into_iter().map(|e| (id, e)));
    }

    tracing::debug!(
        types = types.len(),
        errors = inheritance.errors.len(),
        "inheritance resolved"
    );
    inheritance
}

fn resolve_type(table: &SymbolTable, id: DefId) -> TypeOutcome {
    let def = &table[id];
    let mut errors = Vec::new();

    let parent = def.parent.as_ref().map(|parent| {
        match table.lookup(parent) {
            Some(pid) if table[pid].kind == DefinitionKind::Type => {
                return Reference::resolved(parent.clone(), pid);
            }
            Some(pid) => errors.push(ResolveError::TypeMismatch {
                name: def.name.clone(),
                field: "parentType".to_string(),
                target: parent.clone(),
                expected: "Type",
                found: table[pid].kind,
            }),
            None => errors.push(ResolveError::UnresolvedParent {
                name: def.name.clone(),
                parent: parent.clone(),
            }),
        }
        Reference::unresolved(parent.clone())
    });

    let chain = match walk(table, id) {
        Walk::Chain(chain) => Some(chain),
        Walk::Cycle(members) => {
            let members = canonical(table, members);
            let cycle = names(table, &members);
            if !members.contains(&id) {
                errors.push(ResolveError::InheritsCycle {
                    name: def.name.clone(),
                    cycle,
                });
            } else if members[0] == id {
                errors.push(ResolveError::CyclicInheritance {
                    name: def.name.clone(),
                    cycle,
                });
            }
            None
        }
    };

    TypeOutcome {
        parent,
        chain,
        errors,
    }
}

fn walk(table: &SymbolTable, start: DefId) -> Walk {
    let mut chain = vec![start];
    let mut seen = FxHashSet::default();
    seen.insert(start);

    let mut current = start;
    while let Some(parent) = &table[current].parent {
        let next = match table.lookup(parent) {
            Some(next) if table[next].kind == DefinitionKind::Type => next,
            _ => break,
        };
        if !seen.insert(next) {
            let at = chain.iter().position(|&id| id == next).unwrap_or(0);
            return Walk::Cycle(chain.split_off(at));
        }
        chain.push(next);
        current = next;
    }
    Walk::Chain(chain)
}

/// Rotate a cycle so it starts at its lowest name. Every member then agrees
/// on the same rendering and on which member reports it, whatever the load
/// order.
fn canonical(table: &SymbolTable, mut members: Vec<DefId>) -> Vec<DefId> {
    if let Some(min_at) = members
        .iter()
        .enumerate()
        .min_by_key(|&(_, id)| &table[*id].name)
        .map(|(at, _)| at)
    {
        members.rotate_left(min_at);
    }
    members
}

fn names(table: &SymbolTable, ids: &[DefId]) -> Vec<Name> {
    ids.iter().map(|&id| table[id].name.clone()).collect()
}
