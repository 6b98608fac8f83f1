use std::fmt::Display;

use crate::{Multiplicity, NumEdges, NumNodes};

/// Lexicographic size measure of a multigraph: vertex count first, then total
/// edge count (sum of multiplicities), then the maximum out-degree.
///
/// The derived `Ord` compares fields in declaration order, which is exactly
/// the total order used to decide which of several candidate cycles/graphs
/// is "largest".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphSize {
    pub vertices: NumNodes,
    pub edges: NumEdges,
    pub max_out_degree: Multiplicity,
}

impl GraphSize {
    pub fn new(vertices: NumNodes, edges: NumEdges, max_out_degree: Multiplicity) -> Self {
        Self {
            vertices,
            edges,
            max_out_degree,
        }
    }
}

impl Display for GraphSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(n={}, m={}, maxdeg={})",
            self.vertices, self.edges, self.max_out_degree
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexicographic_order() {
        let small = GraphSize::new(2, 10, 5);
        let more_vertices = GraphSize::new(3, 1, 1);
        let more_edges = GraphSize::new(2, 11, 1);
        let more_degree = GraphSize::new(2, 10, 6);

        assert!(small < more_vertices);
        assert!(small < more_edges);
        assert!(small < more_degree);
        assert!(more_edges < more_vertices);
        assert!(more_degree < more_edges);
    }
}
