//! Menu graph: the DAG of menus and commands formed by child links.
//!
//! Cycle detection is an iterative strongly-connected-components pass
//! (Tarjan): every node is visited once, with an explicit in-progress stack
//! instead of recursion. Every node on a cycle is marked cyclic and left out
//! of tree expansion; the rest of the graph stays renderable.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use super::error::ResolveError;
use super::ids::DefId;
use super::symbol_table::SymbolTable;

/// Adjacency of the menu graph, indexed by handle. Only resolved child
/// links are edges.
#[derive(Debug, Clone, Default)]
pub struct MenuGraph {
    edges: Vec<Vec<DefId>>,
    cyclic: Vec<bool>,
    roots: Vec<DefId>,
}

/// One cycle group found in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// A concrete cycle path in link order, starting at the member with the
    /// lowest name.
    pub path: Vec<DefId>,
    /// Every member of the group, by handle.
    pub members: Vec<DefId>,
}

/// An ordered expansion of the graph below one entity.
///
/// Nodes are stored flat, in pre-order, so deep menu chains never need a
/// deep call stack to build, walk, compare or drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTree {
    root: DefId,
    nodes: Vec<TreeNode>,
}

/// One node of a [`MenuTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: DefId,
    /// Root at depth 0.
    pub depth: usize,
    /// Positions of the children in [`MenuTree::nodes`], in declaration order.
    pub children: Vec<usize>,
}

impl MenuTree {
    /// Handle of the root entity.
    pub fn id(&self) -> DefId {
        self.root
    }

    /// Number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in pre-order; the root is at position 0.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Children of the node at position `at`.
    pub fn children_of(&self, at: usize) -> impl Iterator<Item = &TreeNode> {
        self.nodes
            .get(at)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&child| &self.nodes[child])
    }

    /// Pre-order handles with their depth, root at depth 0.
    pub fn walk(&self) -> Vec<(usize, DefId)> {
        self.nodes.iter().map(|node| (node.depth, node.id)).collect()
    }
}

impl MenuGraph {
    /// Build the graph from each entity's resolved child handles (indexed by
    /// handle) and find its cycles.
    pub fn build(table: &SymbolTable, edges: Vec<Vec<DefId>>) -> (Self, Vec<Cycle>) {
        let components = strongly_connected(&edges);

        let mut cyclic = vec![false; edges.len()];
        let mut cycles = Vec::new();
        for mut members in components {
            let is_cycle = members.len() > 1 || edges[members[0].index()].contains(&members[0]);
            if !is_cycle {
                continue;
            }
            members.sort();
            for id in &members {
                cyclic[id.index()] = true;
            }
            let start = members
                .iter()
                .copied()
                .min_by_key(|id| &table[*id].name)
                .unwrap_or(members[0]);
            let path = cycle_path(&edges, &members, start);
            cycles.push(Cycle { path, members });
        }
        cycles.sort_by_key(|cycle| cycle.members[0]);

        // Links out of cyclic entities do not count: those parents never render
        let mut referenced = vec![false; edges.len()];
        for (parent, children) in edges.iter().enumerate() {
            if cyclic[parent] {
                continue;
            }
            for child in children {
                referenced[child.index()] = true;
            }
        }
        let roots = table
            .iter()
            .filter(|(id, def)| {
                def.kind.is_navigable() && !cyclic[id.index()] && !referenced[id.index()]
            })
            .map(|(id, _)| id)
            .collect();

        let graph = MenuGraph {
            edges,
            cyclic,
            roots,
        };
        (graph, cycles)
    }

    pub fn is_cyclic(&self, id: DefId) -> bool {
        self.cyclic.get(id.index()).copied().unwrap_or(false)
    }

    /// Resolved child handles of an entity, in declaration order.
    pub fn children(&self, id: DefId) -> &[DefId] {
        self.edges.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Renderable roots: non-cyclic menus and commands that no entity lists
    /// as a child.
    pub fn roots(&self) -> &[DefId] {
        &self.roots
    }

    /// Expand the graph below `id`. Cyclic entities are pruned; shared
    /// children appear once under every parent that lists them.
    pub fn tree(&self, id: DefId) -> Option<MenuTree> {
        if self.is_cyclic(id) || id.index() >= self.edges.len() {
            return None;
        }

        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut stack: Vec<(DefId, usize, Option<usize>)> = vec![(id, 0, None)];
        while let Some((node, depth, parent)) = stack.pop() {
            let at = nodes.len();
            if let Some(parent) = parent {
                nodes[parent].children.push(at);
            }
            nodes.push(TreeNode {
                id: node,
                depth,
                children: Vec::new(),
            });
            for &child in self.children(node).iter().rev() {
                if !self.is_cyclic(child) {
                    stack.push((child, depth + 1, Some(at)));
                }
            }
        }

        Some(MenuTree { root: id, nodes })
    }
}

/// Tarjan's algorithm with an explicit call stack.
fn strongly_connected(edges: &[Vec<DefId>]) -> Vec<Vec<DefId>> {
    const UNVISITED: u32 = u32::MAX;

    let n = edges.len();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0u32; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut components = Vec::new();
    let mut counter = 0u32;

    for start in 0..n {
        if index[start] != UNVISITED {
            continue;
        }
        // (node, next child position)
        let mut calls: Vec<(usize, usize)> = vec![(start, 0)];
        index[start] = counter;
        lowlink[start] = counter;
        counter += 1;
        stack.push(start);
        on_stack[start] = true;

        while let Some(&(v, next)) = calls.last() {
            if let Some(&child) = edges[v].get(next) {
                if let Some(top) = calls.last_mut() {
                    top.1 += 1;
                }
                let w = child.index();
                if index[w] == UNVISITED {
                    index[w] = counter;
                    lowlink[w] = counter;
                    counter += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    calls.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            calls.pop();
            if let Some(&(u, _)) = calls.last() {
                lowlink[u] = lowlink[u].min(lowlink[v]);
            }
            if lowlink[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(DefId::new(w));
                    if w == v {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}

/// Shortest cycle through `start`, staying inside the group.
fn cycle_path(edges: &[Vec<DefId>], members: &[DefId], start: DefId) -> Vec<DefId> {
    let in_group: FxHashSet<DefId> = members.iter().copied().collect();
    let mut previous: FxHashMap<DefId, DefId> = FxHashMap::default();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for &next in &edges[node.index()] {
            if next == start {
                let mut path = vec![node];
                let mut at = node;
                while let Some(&prev) = previous.get(&at) {
                    path.push(prev);
                    at = prev;
                }
                path.reverse();
                return path;
            }
            if in_group.contains(&next) && !previous.contains_key(&next) {
                previous.insert(next, node);
                queue.push_back(next);
            }
        }
    }

    members.to_vec()
}

/// Turn cycle groups into diagnostics, reported on the first member of
/// each cycle path.
pub(crate) fn cycle_errors(table: &SymbolTable, cycles: &[Cycle]) -> Vec<(DefId, ResolveError)> {
    cycles
        .iter()
        .map(|cycle| {
            let subject = cycle.path[0];
            (
                subject,
                ResolveError::CyclicMenuGraph {
                    name: table[subject].name.clone(),
                    cycle: cycle.path.iter().map(|&id| table[id].name.clone()).collect(),
                },
            )
        })
        .collect()
}
