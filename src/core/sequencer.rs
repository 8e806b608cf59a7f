//! Continuity graph sequencing.
//!
//! Builds a directed graph over a scope of catalog items from the curated
//! relationships and produces a reading order with Kahn's algorithm.
//!
//! # Ordering contract
//!
//! - Members with in-degree 0 seed a FIFO queue in scope order.
//! - Dequeued members are emitted; each outgoing neighbor (in edge input
//!   order) has its in-degree decremented and is enqueued the moment it
//!   reaches 0.
//! - Members never dequeued (cycles, or anything only reachable through a
//!   cycle) are appended afterwards in scope order.
//!
//! The result always covers every scope member exactly once, even over cyclic
//! or disconnected input. Callers needing strict DAG semantics check
//! [`find_cycles`] themselves.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::domain::{held_slugs, CatalogItem, Era, OwnershipRecord, RelationType, Relationship};

/// Ordered scope plus the members placed by the cycle fallback
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    /// Every scope member exactly once
    pub order: Vec<String>,

    /// Members appended after the topological pass, in scope order
    pub appended: Vec<String>,
}

/// Continuity graph restricted to a scope and an allowed set of types
struct ScopedGraph {
    graph: DiGraph<String, RelationType>,
}

impl ScopedGraph {
    fn build<S: AsRef<str>>(scope: &[S], edges: &[Relationship], allowed: &[RelationType]) -> Self {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for slug in scope {
            let slug = slug.as_ref();
            if !index.contains_key(slug) {
                index.insert(slug, graph.add_node(slug.to_string()));
            }
        }

        for edge in edges {
            if !allowed.contains(&edge.relation_type) {
                continue;
            }
            if let (Some(&from), Some(&to)) = (
                index.get(edge.source_slug.as_str()),
                index.get(edge.target_slug.as_str()),
            ) {
                graph.add_edge(from, to, edge.relation_type);
            }
        }

        Self { graph }
    }

    /// Outgoing neighbors per node, in edge insertion order
    fn adjacency(&self) -> Vec<Vec<NodeIndex>> {
        let mut adjacency = vec![Vec::new(); self.graph.node_count()];
        for edge in self.graph.raw_edges() {
            adjacency[edge.source().index()].push(edge.target());
        }
        adjacency
    }

    fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.graph.node_count()];
        for edge in self.graph.raw_edges() {
            degrees[edge.target().index()] += 1;
        }
        degrees
    }
}

/// Order `scope` along edges whose type is in `allowed`.
pub fn sequence<S: AsRef<str>>(
    scope: &[S],
    edges: &[Relationship],
    allowed: &[RelationType],
) -> Vec<String> {
    sequence_with_report(scope, edges, allowed).order
}

/// Like [`sequence`], also reporting which members the cycle policy appended.
pub fn sequence_with_report<S: AsRef<str>>(
    scope: &[S],
    edges: &[Relationship],
    allowed: &[RelationType],
) -> Sequence {
    let scoped = ScopedGraph::build(scope, edges, allowed);
    let graph = &scoped.graph;
    let adjacency = scoped.adjacency();
    let mut in_degree = scoped.in_degrees();

    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();
    let mut emitted = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(node) = queue.pop_front() {
        emitted[node.index()] = true;
        order.push(graph[node].clone());

        for &next in &adjacency[node.index()] {
            let degree = &mut in_degree[next.index()];
            if *degree == 0 {
                continue;
            }
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(next);
            }
        }
    }

    let appended: Vec<String> = graph
        .node_indices()
        .filter(|node| !emitted[node.index()])
        .map(|node| graph[node].clone())
        .collect();

    if !appended.is_empty() {
        debug!(
            appended = appended.len(),
            scope = graph.node_count(),
            "Cycle fallback appended unsorted members"
        );
    }
    order.extend(appended.iter().cloned());

    Sequence { order, appended }
}

/// Strongly connected components that make the scoped graph cyclic.
///
/// Each component is a sorted slug list; self-loops show up as a single
/// member. Components are sorted for stable output.
pub fn find_cycles<S: AsRef<str>>(
    scope: &[S],
    edges: &[Relationship],
    allowed: &[RelationType],
) -> Vec<Vec<String>> {
    let scoped = ScopedGraph::build(scope, edges, allowed);
    let graph = &scoped.graph;

    let mut cycles: Vec<Vec<String>> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| graph.contains_edge(*node, *node))
        })
        .map(|component| {
            let mut slugs: Vec<String> = component.into_iter().map(|n| graph[n].clone()).collect();
            slugs.sort_unstable();
            slugs
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Position of a held item when several are ready at once: catalog items
/// first, then era number, importance, lowercase title and slug
type ReadingKey = (bool, i32, u8, String, String);

/// Reading order for everything a reader holds (owned, reading, completed).
///
/// A priority variant of [`sequence`] over the reading-order relationship
/// types: whenever several items are ready, the one with the smallest
/// (era number, importance, title) goes next, including items freed up
/// mid-run. Members left over by cycles are appended in the same order.
pub fn collection_reading_order(
    ownership: &[OwnershipRecord],
    catalog: &[CatalogItem],
    eras: &[Era],
    edges: &[Relationship],
) -> Vec<String> {
    let held = held_slugs(ownership);
    if held.is_empty() {
        return Vec::new();
    }

    let era_numbers: HashMap<&str, i32> = eras.iter().map(|e| (e.slug.as_str(), e.number)).collect();
    let items: HashMap<&str, &CatalogItem> = catalog.iter().map(|i| (i.slug.as_str(), i)).collect();
    let key_for = |slug: &str| -> ReadingKey {
        match items.get(slug) {
            Some(item) => (
                false,
                era_numbers.get(item.era_slug.as_str()).copied().unwrap_or(i32::MAX),
                item.importance.rank(),
                item.title.to_lowercase(),
                slug.to_string(),
            ),
            None => (true, i32::MAX, u8::MAX, String::new(), slug.to_string()),
        }
    };

    let mut scope: Vec<&str> = held.iter().map(String::as_str).collect();
    scope.sort_unstable();

    let scoped = ScopedGraph::build(&scope, edges, &RelationType::READING_ORDER);
    let graph = &scoped.graph;
    let adjacency = scoped.adjacency();
    let mut in_degree = scoped.in_degrees();
    let keys: Vec<ReadingKey> = graph.node_indices().map(|node| key_for(graph[node].as_str())).collect();

    let mut ready: BinaryHeap<Reverse<(&ReadingKey, NodeIndex)>> = graph
        .node_indices()
        .filter(|node| in_degree[node.index()] == 0)
        .map(|node| Reverse((&keys[node.index()], node)))
        .collect();
    let mut emitted = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(Reverse((_, node))) = ready.pop() {
        emitted[node.index()] = true;
        order.push(graph[node].clone());

        for &next in &adjacency[node.index()] {
            let degree = &mut in_degree[next.index()];
            if *degree == 0 {
                continue;
            }
            *degree -= 1;
            if *degree == 0 {
                ready.push(Reverse((&keys[next.index()], next)));
            }
        }
    }

    let mut remaining: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|node| !emitted[node.index()])
        .collect();
    remaining.sort_by(|a, b| keys[a.index()].cmp(&keys[b.index()]));
    order.extend(remaining.into_iter().map(|node| graph[node].clone()));

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, kind: RelationType) -> Relationship {
        Relationship::new(from, to, kind, 5)
    }

    #[test]
    fn test_duplicate_scope_members_appear_once() {
        let order = sequence(&["a", "b", "a"], &[], &RelationType::ALL);
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_edges_outside_scope_or_type_are_ignored() {
        let edges = vec![
            edge("b", "a", RelationType::References),
            edge("x", "a", RelationType::LeadsTo),
        ];
        let order = sequence(&["a", "b"], &edges, &RelationType::SAGA);
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_self_loop_is_appended_and_reported() {
        let edges = vec![edge("a", "a", RelationType::TiesInto)];
        let seq = sequence_with_report(&["a", "b"], &edges, &RelationType::ALL);
        assert_eq!(seq.order, vec!["b", "a"]);
        assert_eq!(seq.appended, vec!["a"]);
        assert_eq!(find_cycles(&["a", "b"], &edges, &RelationType::ALL), vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_parallel_edges_count_toward_in_degree() {
        let edges = vec![
            edge("a", "c", RelationType::LeadsTo),
            edge("a", "c", RelationType::Prerequisite),
            edge("b", "c", RelationType::LeadsTo),
        ];
        let order = sequence(&["c", "b", "a"], &edges, &RelationType::SAGA);
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_scope() {
        let scope: [&str; 0] = [];
        assert!(sequence(&scope, &[], &RelationType::ALL).is_empty());
    }
}
