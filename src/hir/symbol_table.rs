//! Symbol table: one name space shared by every definition kind.
//!
//! The table has two phases, expressed as two types:
//!
//! - [`SymbolTableBuilder`]: write phase. Definitions are registered in order;
//!   the first registration of a name (or UUID) wins.
//! - [`SymbolTable`]: read phase. Produced by [`SymbolTableBuilder::close`];
//!   no further registration is possible, so every resolution phase can share
//!   it freely across threads.
//!
//! Definitions are stored in a single vector and referred to by [`DefId`]
//! from all other maps.

use rustc_hash::FxHashMap;
use uuid::Uuid;

use super::error::ResolveError;
use super::ids::DefId;
use crate::base::Name;
use crate::syntax::{Definition, DefinitionKind};

/// Write phase of the symbol table.
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    /// The single source of truth for all definitions.
    definitions: Vec<Definition>,
    by_name: FxHashMap<Name, DefId>,
    by_uuid: FxHashMap<Uuid, DefId>,
}

impl SymbolTableBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// A definition whose name, or UUID, is already taken is rejected: the
    /// error names it and the earlier owner, the definition itself is
    /// dropped, and the earlier definition stands.
    pub fn register(&mut self, definition: Definition) -> Result<DefId, ResolveError> {
        if let Some(&existing) = self.by_name.get(&definition.name) {
            return Err(ResolveError::DuplicateName {
                name: definition.name,
                kind: definition.kind,
                existing: self.definitions[existing.index()].kind,
            });
        }
        if let Some(uuid) = definition.uuid {
            if let Some(&owner) = self.by_uuid.get(&uuid) {
                return Err(ResolveError::DuplicateUuid {
                    name: definition.name,
                    uuid,
                    owner: self.definitions[owner.index()].name.clone(),
                });
            }
        }

        let id = DefId::new(self.definitions.len());
        self.by_name.insert(definition.name.clone(), id);
        if let Some(uuid) = definition.uuid {
            self.by_uuid.insert(uuid, id);
        }
        self.definitions.push(definition);
        Ok(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// End the write phase.
    pub fn close(self) -> SymbolTable {
        let mut by_kind: FxHashMap<DefinitionKind, Vec<DefId>> = FxHashMap::default();
        for (index, def) in self.definitions.iter().enumerate() {
            by_kind.entry(def.kind).or_default().push(DefId::new(index));
        }

        tracing::debug!(definitions = self.definitions.len(), "symbol table closed");

        SymbolTable {
            definitions: self.definitions,
            by_name: self.by_name,
            by_uuid: self.by_uuid,
            by_kind,
        }
    }
}

/// Read phase of the symbol table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    definitions: Vec<Definition>,
    by_name: FxHashMap<Name, DefId>,
    by_uuid: FxHashMap<Uuid, DefId>,
    by_kind: FxHashMap<DefinitionKind, Vec<DefId>>,
}

impl SymbolTable {
    /// Look up a definition handle by name (case-sensitive, any kind).
    pub fn lookup(&self, name: &str) -> Option<DefId> {
        self.by_name.get(name).copied()
    }

    /// Look up a definition by name.
    pub fn lookup_def(&self, name: &str) -> Option<&Definition> {
        self.lookup(name).map(|id| &self[id])
    }

    pub fn lookup_uuid(&self, uuid: &Uuid) -> Option<DefId> {
        self.by_uuid.get(uuid).copied()
    }

    pub fn get(&self, id: DefId) -> Option<&Definition> {
        self.definitions.get(id.index())
    }

    /// All handles of one kind, in registration order.
    pub fn of_kind(&self, kind: DefinitionKind) -> &[DefId] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All handles, in registration order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = DefId> + '_ {
        (0..self.definitions.len()).map(DefId::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, def)| (DefId::new(index), def))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl std::ops::Index<DefId> for SymbolTable {
    type Output = Definition;

    fn index(&self, id: DefId) -> &Definition {
        &self.definitions[id.index()]
    }
}
