//! The resolution pipeline and its result.
//!
//! ```text
//! blocks ─lower─▶ Definition ─register─▶ SymbolTable (closed)
//!                                            │
//!            ┌──────────────┬────────────────┼─────────────┐
//!            ▼              ▼                ▼             ▼
//!       inheritance ─▶ cascade           linker ─▶ menu graph
//!            └──────────────┴──────┬─────────┴─────────────┘
//!                                  ▼
//!                    LoadResult { graph, diagnostics }
//! ```
//!
//! Loading never fails: every problem is a diagnostic, and everything that
//! could be resolved is in the graph.

use rayon::prelude::*;
use uuid::Uuid;

use super::cascade::{AttributeSlot, Cascade, cascade_all};
use super::diagnostics::{Diagnostic, DiagnosticCollector, Severity};
use super::error::ResolveError;
use super::graph::{MenuGraph, MenuTree, cycle_errors};
use super::ids::DefId;
use super::inheritance::{Inheritance, resolve_inheritance};
use super::linker::{Links, link_all};
use super::resolved::{ResolvedAttribute, ResolvedEntity};
use super::symbol_table::{SymbolTable, SymbolTableBuilder};
use crate::config::LoadOptions;
use crate::syntax::{Definition, DefinitionBlock, DefinitionKind, StatementError, lower_block};

/// All resolved entities of a load, plus the menu graph over them.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    table: SymbolTable,
    entities: Vec<ResolvedEntity>,
    menus: MenuGraph,
}

impl ResolvedGraph {
    pub fn get(&self, name: &str) -> Option<&ResolvedEntity> {
        self.table.lookup(name).map(|id| &self.entities[id.index()])
    }

    pub fn entity(&self, id: DefId) -> Option<&ResolvedEntity> {
        self.entities.get(id.index())
    }

    pub fn by_uuid(&self, uuid: &Uuid) -> Option<&ResolvedEntity> {
        self.table.lookup_uuid(uuid).map(|id| &self.entities[id.index()])
    }

    /// Entities of one kind, in registration order.
    pub fn of_kind(&self, kind: DefinitionKind) -> impl Iterator<Item = &ResolvedEntity> {
        self.table
            .of_kind(kind)
            .iter()
            .map(|id| &self.entities[id.index()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The lowered definition an entity was resolved from.
    pub fn definition(&self, id: DefId) -> Option<&Definition> {
        self.table.get(id)
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Ancestors of a type, closest first, not including the type itself.
    pub fn ancestors(&self, id: DefId) -> impl Iterator<Item = &ResolvedEntity> {
        self.entity(id)
            .and_then(|e| e.ancestors.as_deref())
            .unwrap_or(&[])
            .iter()
            .skip(1)
            .map(|ancestor| &self.entities[ancestor.index()])
    }

    /// Renderable roots of the menu graph, in registration order.
    pub fn roots(&self) -> impl Iterator<Item = &ResolvedEntity> {
        self.menus
            .roots()
            .iter()
            .map(|id| &self.entities[id.index()])
    }

    /// Renderable children of an entity, in declaration order. Unresolved
    /// and cyclic children are skipped.
    pub fn children(&self, id: DefId) -> impl Iterator<Item = &ResolvedEntity> {
        self.menus
            .children(id)
            .iter()
            .filter(|child| !self.menus.is_cyclic(**child))
            .map(|child| &self.entities[child.index()])
    }

    /// Ordered tree below the named menu or command. `None` for unknown or
    /// cyclic entities.
    pub fn tree(&self, name: &str) -> Option<MenuTree> {
        self.menus.tree(self.table.lookup(name)?)
    }

    /// Trees below every renderable root.
    pub fn forest(&self) -> Vec<MenuTree> {
        self.menus
            .roots()
            .iter()
            .filter_map(|&id| self.menus.tree(id))
            .collect()
    }
}

impl std::ops::Index<DefId> for ResolvedGraph {
    type Output = ResolvedEntity;

    fn index(&self, id: DefId) -> &ResolvedEntity {
        &self.entities[id.index()]
    }
}

/// The outcome of a load: always produced, possibly with diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    graph: ResolvedGraph,
    diagnostics: Vec<Diagnostic>,
}

impl LoadResult {
    pub fn new(graph: ResolvedGraph, diagnostics: Vec<Diagnostic>) -> Self {
        Self { graph, diagnostics }
    }

    pub fn graph(&self) -> &ResolvedGraph {
        &self.graph
    }

    /// Shorthand for `graph().get(name)`.
    pub fn get(&self, name: &str) -> Option<&ResolvedEntity> {
        self.graph.get(name)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics about one entity (or source).
    pub fn diagnostics_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.subject == subject)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// No diagnostics of any severity.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_parts(self) -> (ResolvedGraph, Vec<Diagnostic>) {
        (self.graph, self.diagnostics)
    }
}

/// Resolve definition blocks into a graph.
///
/// Blocks are registered in the order given; when two blocks share a name,
/// the first one wins.
pub fn resolve(blocks: Vec<DefinitionBlock>, options: &LoadOptions) -> LoadResult {
    resolve_with(blocks, DiagnosticCollector::new(), options)
}

/// [`resolve`], appending to diagnostics collected earlier (e.g. syntax
/// errors of the sources the blocks came from).
pub fn resolve_with(
    blocks: Vec<DefinitionBlock>,
    mut diagnostics: DiagnosticCollector,
    options: &LoadOptions,
) -> LoadResult {
    let _span = tracing::info_span!("resolve", blocks = blocks.len()).entered();

    let lowered = lower_all(&blocks, options);
    let table = register_all(lowered, &mut diagnostics);

    let mut inheritance = resolve_inheritance(&table, options.parallel);
    report(&table, &mut diagnostics, inheritance.take_errors());

    let (cascades, errors) = cascade_all(&table, &inheritance, options.parallel);
    report(&table, &mut diagnostics, errors);

    let (links, errors) = link_all(&table, options);
    report(&table, &mut diagnostics, errors);

    let edges: Vec<Vec<DefId>> = links
        .iter()
        .map(|l| l.children.iter().filter_map(|c| c.reference.target).collect())
        .collect();
    let (menus, cycles) = MenuGraph::build(&table, edges);
    report(&table, &mut diagnostics, cycle_errors(&table, &cycles));

    let entities = assemble(&table, &inheritance, cascades, &links, &menus);
    let diagnostics = diagnostics.finish();

    tracing::info!(
        entities = entities.len(),
        errors = diagnostics.iter().filter(|d| d.is_error()).count(),
        diagnostics = diagnostics.len(),
        "definitions resolved"
    );

    LoadResult {
        graph: ResolvedGraph {
            table,
            entities,
            menus,
        },
        diagnostics,
    }
}

fn lower_all(
    blocks: &[DefinitionBlock],
    options: &LoadOptions,
) -> Vec<(Definition, Vec<StatementError>)> {
    let separator = options.query_type_separator;
    if options.parallel {
        blocks
            .par_iter()
            .map(|block| lower_block(block, separator))
            .collect()
    } else {
        blocks
            .iter()
            .map(|block| lower_block(block, separator))
            .collect()
    }
}

fn register_all(
    lowered: Vec<(Definition, Vec<StatementError>)>,
    diagnostics: &mut DiagnosticCollector,
) -> SymbolTable {
    let mut builder = SymbolTableBuilder::new();
    let mut rejected = 0usize;
    for (def, errors) in lowered {
        let origin = def.origin;
        for error in errors {
            diagnostics.report(
                ResolveError::InvalidStatement {
                    name: def.name.clone(),
                    message: error.to_string(),
                },
                origin,
            );
        }
        if let Err(error) = builder.register(def) {
            tracing::trace!(%error, "definition rejected");
            rejected += 1;
            diagnostics.report(error, origin);
        }
    }
    tracing::debug!(registered = builder.len(), rejected, "definitions registered");
    builder.close()
}

fn report(
    table: &SymbolTable,
    diagnostics: &mut DiagnosticCollector,
    errors: Vec<(DefId, ResolveError)>,
) {
    for (id, error) in errors {
        diagnostics.report(error, table[id].origin);
    }
}

fn assemble(
    table: &SymbolTable,
    inheritance: &Inheritance,
    cascades: Vec<Option<Cascade>>,
    links: &[Links],
    menus: &MenuGraph,
) -> Vec<ResolvedEntity> {
    table
        .iter()
        .zip(cascades)
        .map(|((id, def), cascade)| {
            let entity_links = &links[id.index()];
            let ancestors = inheritance.chain(id).map(<[DefId]>::to_vec);
            let (properties, slots) = match cascade {
                // No ancestor chain: own attributes only, no effective properties
                Some(cascade) if ancestors.is_none() => (None, cascade.attributes),
                Some(cascade) => (Some(cascade.properties), cascade.attributes),
                None => (Some(def.properties.clone()), Vec::new()),
            };

            ResolvedEntity {
                id,
                kind: def.kind,
                name: def.name.clone(),
                uuid: def.uuid,
                icon: def.icon.clone(),
                parent: inheritance.parent(id).cloned(),
                ancestors,
                properties,
                attributes: slots
                    .iter()
                    .map(|slot| resolved_attribute(table, links, *slot))
                    .collect(),
                children: entity_links.children.clone(),
                target: entity_links.target.clone(),
                cyclic: menus.is_cyclic(id),
                origin: def.origin,
            }
        })
        .collect()
}

fn resolved_attribute(table: &SymbolTable, links: &[Links], slot: AttributeSlot) -> ResolvedAttribute {
    let attr = &table[slot.owner].attributes[slot.index];
    ResolvedAttribute {
        owner: slot.owner,
        name: attr.name.clone(),
        attribute_type: attr.attribute_type.clone(),
        sql_table: attr.sql_table.clone(),
        sql_column: attr.sql_column.clone(),
        type_link: links[slot.owner.index()]
            .type_links
            .get(slot.index)
            .cloned()
            .flatten(),
    }
}
