/*!
# Multigraph Generators

This module provides traits and builder patterns for constructing random
multigraph generators as well as deterministic substructures (walks, cycles).

Generators follow a builder-style pattern:

1. Create a generator instance (e.g., `UniformMultigraph::new()`).
2. Set parameters using trait methods (e.g., `.vertices(n).edges(m)`).
3. Generate edges via `generate()` or `stream()`.

Since parallel edges are first-class here, uniform generation samples ordered
vertex pairs **with replacement**: drawing the same pair twice raises its
multiplicity instead of being rejected. Self-loops are never generated.
*/

use itertools::Itertools;
use rand::Rng;

use crate::prelude::*;

/// Trait for generators that allow setting the number of vertices.
pub trait NumVerticesGen {
    /// Sets the number of vertices in the generator.
    fn vertices(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the number of edges.
pub trait NumEdgesGen {
    /// Sets the number of edges (counting multiplicities) in the generator.
    fn edges(self, m: NumEdges) -> Self;
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list or a
/// lazily-evaluated stream (iterator) of edges.
pub trait MultigraphGenerator {
    /// Generates a list of random edges.
    ///
    /// This collects the full result from `stream()` into a `Vec<Edge>` as default.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    fn stream<'a, R>(&self, rng: &'a mut R) -> impl Iterator<Item = Edge> + 'a
    where
        R: Rng;
}

/// Generator for uniform random multigraphs with `n` vertices and exactly `m`
/// edges, where each edge is an ordered pair drawn uniformly from all non-loop
/// pairs, independently and with replacement.
#[derive(Debug, Copy, Clone, Default)]
pub struct UniformMultigraph {
    n: NumNodes,
    m: Option<NumEdges>,
}

impl UniformMultigraph {
    /// Creates a new empty uniform multigraph generator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NumVerticesGen for UniformMultigraph {
    fn vertices(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl NumEdgesGen for UniformMultigraph {
    fn edges(mut self, m: NumEdges) -> Self {
        self.m = Some(m);
        self
    }
}

impl MultigraphGenerator for UniformMultigraph {
    /// Returns a streaming iterator over the random edge multiset.
    ///
    /// # Panics
    /// - If fewer than two vertices were configured (no non-loop pair exists)
    /// - If `edges(m)` was not set
    fn stream<'a, R>(&self, rng: &'a mut R) -> impl Iterator<Item = Edge> + 'a
    where
        R: Rng,
    {
        assert!(self.n > 1, "At least two vertices must be generated!");
        let n = self.n;
        let m = self.m.expect("Number of edges was not set!");

        (0..m).map(move |_| {
            let u = rng.random_range(0..n);
            // Sample v from the n - 1 vertices other than u.
            let mut v = rng.random_range(0..n - 1);
            if v >= u {
                v += 1;
            }
            Edge(u, v)
        })
    }
}

/// Trait for building full multigraph instances from random models.
pub trait RandomMultigraph: Sized {
    /// Creates a uniform random multigraph with `n` vertices and `m` edges.
    fn random<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng;
}

impl<G> RandomMultigraph for G
where
    G: MultigraphNew + MultigraphEditing,
{
    fn random<R>(rng: &mut R, n: NumNodes, m: NumEdges) -> Self
    where
        R: Rng,
    {
        let mut graph = Self::new(n);
        graph.add_edges(UniformMultigraph::new().vertices(n).edges(m).stream(rng));
        graph
    }
}

/// Trait for creating additional **substructures** (walks, cycles) inside an
/// already existing multigraph.
///
/// Implemented for all multigraphs that support edge editing.
pub trait GeneratorSubstructures {
    /// Connects the given vertices in order with a **walk**.
    ///
    /// Each consecutive pair of vertices gains one parallel edge.
    fn connect_walk<P>(&mut self, vertices_on_walk: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given vertices with a **cycle**.
    ///
    /// - Consecutive vertices are connected by edges.
    /// - Additionally, the last vertex is connected back to the first.
    fn connect_cycle<C>(&mut self, vertices_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;
}

impl<G> GeneratorSubstructures for G
where
    G: MultigraphEditing,
{
    fn connect_walk<P>(&mut self, vertices_on_walk: P)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in vertices_on_walk.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, vertices_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = vertices_in_cycle.into_iter();

        // we use a rather tedious implementation to avoid needing to clone the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            for cur in iter {
                self.add_edge(prev, cur);
                prev = cur;
            }

            self.add_edge(prev, first);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::repr::DenseMultigraph;

    #[test]
    fn uniform_edge_count_and_no_loops() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for n in [2 as NumNodes, 5, 20] {
            for m in [0 as NumEdges, 1, 50] {
                let edges = UniformMultigraph::new()
                    .vertices(n)
                    .edges(m)
                    .generate(rng);

                assert_eq!(edges.len() as NumEdges, m);
                assert!(edges.iter().all(|e| !e.is_loop() && e.0 < n && e.1 < n));

                let graph = DenseMultigraph::random(rng, n, m);
                assert_eq!(graph.number_of_edges(), m);
                assert!(graph.vertices().all(|u| graph.multiplicity(u, u) == 0));
            }
        }
    }

    #[test]
    fn uniform_is_deterministic_per_seed() {
        let a = UniformMultigraph::new()
            .vertices(12)
            .edges(40)
            .generate(&mut Pcg64Mcg::seed_from_u64(123));
        let b = UniformMultigraph::new()
            .vertices(12)
            .edges(40)
            .generate(&mut Pcg64Mcg::seed_from_u64(123));
        assert_eq!(a, b);
    }

    #[test]
    fn connect_walk_and_cycle() {
        {
            let mut g = DenseMultigraph::new(6);
            g.connect_walk([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = DenseMultigraph::new(6);
            g.connect_walk([0, 3, 1, 4]);
            assert_eq!(g.number_of_edges(), 3);
            assert!(g.has_edge(0, 3) && g.has_edge(3, 1) && g.has_edge(1, 4));
        }

        {
            let mut g = DenseMultigraph::new(6);
            g.connect_cycle([0, 3, 1]);
            g.connect_cycle([0, 3, 1]);
            assert_eq!(g.multiplicity(0, 3), 2);
            assert_eq!(g.multiplicity(1, 0), 2);
            assert_eq!(g.number_of_edges(), 6);
        }

        {
            // A one-vertex cycle is a self-loop.
            let mut g = DenseMultigraph::new(2);
            g.connect_cycle([1]);
            assert_eq!(g.multiplicity(1, 1), 1);
        }
    }
}
