//! Inheritance graph.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: one per registered type, weighted by its `TypeHash`
//! - Edges: derived -> direct base
//!
//! The graph exists only while a registry is being built. It rejects cycles
//! and yields the transitive ancestor set of every type.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use rustc_hash::{FxHashMap, FxHashSet};

use reflection_core::{RegistrationError, Type, TypeHash};

/// Derived-to-base graph over a set of resolved types.
pub(crate) struct InheritanceGraph {
    graph: DiGraph<TypeHash, ()>,
    nodes: FxHashMap<TypeHash, NodeIndex>,
}

impl InheritanceGraph {
    /// Build the graph. Every base link must already be resolved.
    pub(crate) fn new(types: &FxHashMap<TypeHash, Type>) -> Self {
        // Sorted so node order, and with it cycle reports, is deterministic.
        let mut sorted: Vec<&Type> = types.values().collect();
        sorted.sort_unstable_by_key(|ty| ty.name());

        let mut graph = DiGraph::with_capacity(sorted.len(), 0);
        let mut nodes = FxHashMap::default();
        for ty in &sorted {
            nodes.insert(ty.type_hash(), graph.add_node(ty.type_hash()));
        }
        for ty in &sorted {
            let derived = nodes[&ty.type_hash()];
            for base in ty.bases() {
                if let Some(&base) = nodes.get(base) {
                    graph.add_edge(derived, base, ());
                }
            }
        }

        Self { graph, nodes }
    }

    /// Fail with the first type found on a cycle.
    pub(crate) fn check_acyclic(
        &self,
        types: &FxHashMap<TypeHash, Type>,
    ) -> Result<(), RegistrationError> {
        toposort(&self.graph, None).map(|_| ()).map_err(|cycle| {
            let hash = self.graph[cycle.node_id()];
            let name = types.get(&hash).map_or("<unknown>", |ty| ty.name());
            RegistrationError::CyclicInheritance(name.to_string())
        })
    }

    /// Every type reachable from `hash` through base links, excluding itself.
    ///
    /// Only meaningful once [`check_acyclic`](Self::check_acyclic) passed.
    pub(crate) fn ancestors(&self, hash: TypeHash) -> FxHashSet<TypeHash> {
        let mut ancestors = FxHashSet::default();
        let Some(&start) = self.nodes.get(&hash) else {
            return ancestors;
        };
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(node) = dfs.next(&self.graph) {
            if node != start {
                ancestors.insert(self.graph[node]);
            }
        }
        ancestors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflection_core::{TypeFlags, TypeTraits};

    struct A;
    struct B;
    struct C;
    struct D;

    fn ty<T: 'static>(name: &'static str, bases: &[&'static str]) -> Type {
        let mut ty = Type::new(TypeTraits::of::<T>(name, TypeFlags::empty()));
        for &base in bases {
            ty.add_base(TypeHash::from_name(base), base).unwrap();
        }
        ty
    }

    fn map(types: Vec<Type>) -> FxHashMap<TypeHash, Type> {
        types.into_iter().map(|ty| (ty.type_hash(), ty)).collect()
    }

    #[test]
    fn diamond_ancestors() {
        let types = map(vec![
            ty::<A>("A", &[]),
            ty::<B>("B", &["A"]),
            ty::<C>("C", &["A"]),
            ty::<D>("D", &["B", "C"]),
        ]);
        let graph = InheritanceGraph::new(&types);
        graph.check_acyclic(&types).unwrap();

        let h = TypeHash::from_name;
        let d = graph.ancestors(h("D"));
        assert_eq!(d.len(), 3);
        assert!(d.contains(&h("A")) && d.contains(&h("B")) && d.contains(&h("C")));
        assert_eq!(graph.ancestors(h("B")), [h("A")].into_iter().collect::<FxHashSet<_>>());
        assert!(graph.ancestors(h("A")).is_empty());
        assert!(graph.ancestors(h("Missing")).is_empty());
    }

    #[test]
    fn cycle_is_rejected() {
        let types = map(vec![
            ty::<A>("A", &["C"]),
            ty::<B>("B", &["A"]),
            ty::<C>("C", &["B"]),
        ]);
        let graph = InheritanceGraph::new(&types);
        assert!(matches!(
            graph.check_acyclic(&types),
            Err(RegistrationError::CyclicInheritance(_))
        ));
    }
}
