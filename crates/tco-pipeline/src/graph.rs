//! Configuration reachability graph
//!
//! Nodes are the distinct scenario sets of a requirements feed, in
//! first-seen order. There is an edge from every strict superset to every
//! strict subset: the edge set is the full subset relation, not its Hasse
//! diagram, so the immediate successors of a node are all of its strict
//! subsets.

use tco_model::ScenarioSet;

/// Index of a node in a [`ConfigurationGraph`]
pub type NodeIndex = usize;

/// Arena of configurations with index-based superset -> subset edges
#[derive(Debug, Clone, Default)]
pub struct ConfigurationGraph {
    nodes: Vec<ScenarioSet>,
    successors: Vec<Vec<NodeIndex>>,
}

impl ConfigurationGraph {
    /// Build the graph over `nodes`, comparing all pairs
    ///
    /// `nodes` must not contain two equal sets.
    #[must_use]
    pub fn build(nodes: Vec<ScenarioSet>) -> Self {
        let n = nodes.len();
        let mut successors = vec![Vec::new(); n];

        for (sub, sub_set) in nodes.iter().enumerate() {
            for (sup, sup_set) in nodes.iter().enumerate() {
                if sub_set.is_strict_subset_of(sup_set) {
                    successors[sup].push(sub);
                }
            }
        }

        Self { nodes, successors }
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&ScenarioSet> {
        self.nodes.get(index)
    }

    /// All strict subsets of `index`, in node order
    #[must_use]
    pub fn successors(&self, index: NodeIndex) -> &[NodeIndex] {
        self.successors.get(index).map_or(&[], Vec::as_slice)
    }
}
