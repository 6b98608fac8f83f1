/*!
Dense representation with cached out-degrees.

Wraps [`DenseMultigraph`] and keeps every out-degree up to date on edits, so
degree queries (and thus [`MultigraphOps::size`]) avoid rescanning matrix
rows. Useful for search loops that repeatedly compare graph sizes.
*/

use crate::{repr::dense::RowNeighbors, *};

/// A [`DenseMultigraph`] that additionally caches all out-degrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeCachedMultigraph {
    graph: DenseMultigraph,
    out_degrees: Vec<Multiplicity>,
}

impl MultigraphOrder for DegreeCachedMultigraph {
    fn number_of_vertices(&self) -> NumNodes {
        self.graph.number_of_vertices()
    }
}

impl MultigraphOps for DegreeCachedMultigraph {
    fn multiplicity(&self, u: Node, v: Node) -> Multiplicity {
        self.graph.multiplicity(u, v)
    }

    type NeighborIter<'a> = RowNeighbors<'a>;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        self.graph.neighbors_of(u)
    }

    fn out_degree_of(&self, u: Node) -> Multiplicity {
        self.out_degrees[u as usize]
    }

    fn to_matrix(&self) -> Vec<Vec<Multiplicity>> {
        self.graph.to_matrix()
    }
}

impl MultigraphNew for DegreeCachedMultigraph {
    fn new(n: NumNodes) -> Self {
        Self {
            graph: DenseMultigraph::new(n),
            out_degrees: vec![0; n as usize],
        }
    }

    fn from_matrix(matrix: Vec<Vec<Multiplicity>>) -> Result<Self, MultigraphError> {
        let graph = DenseMultigraph::from_matrix(matrix)?;
        let out_degrees = graph
            .vertices()
            .map(|u| graph.out_degree_of(u))
            .collect();
        Ok(Self { graph, out_degrees })
    }
}

impl MultigraphEditing for DegreeCachedMultigraph {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.graph.add_edge(u, v);
        self.out_degrees[u as usize] += 1;
    }

    fn set_multiplicity(&mut self, u: Node, v: Node, m: Multiplicity) {
        let old = self.graph.multiplicity(u, v);
        self.graph.set_multiplicity(u, v, m);
        self.out_degrees[u as usize] = self.out_degrees[u as usize] - old + m;
    }

    fn remove_edges_at_vertex(&mut self, u: Node) {
        // Zeroing column u lowers the degree of every other vertex too.
        for w in self.graph.vertices() {
            self.out_degrees[w as usize] -= self.graph.multiplicity(w, u);
        }
        self.out_degrees[u as usize] = 0;
        self.graph.remove_edges_at_vertex(u);
    }
}

crate::testing::test_multigraph_ops!(degree_cached_ops, DegreeCachedMultigraph);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_survives_vertex_removal() {
        let mut g = DegreeCachedMultigraph::from_matrix(vec![
            vec![0, 3, 1],
            vec![2, 0, 0],
            vec![0, 5, 0],
        ])
        .unwrap();
        assert_eq!(g.out_degree_of(0), 4);

        g.remove_edges_at_vertex(1);
        assert_eq!(g.out_degree_of(0), 1);
        assert_eq!(g.out_degree_of(1), 0);
        assert_eq!(g.out_degree_of(2), 0);
        assert_eq!(g.number_of_edges(), 1);
    }
}
