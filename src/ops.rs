use std::ops::Range;

use thiserror::Error;

use crate::*;

/// Error raised when constructing a multigraph from malformed input.
///
/// Construction fails fast: no partial graph state is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MultigraphError {
    #[error("adjacency matrix must be square: row {row} has {cols} entries but there are {rows} rows")]
    NonSquare { row: usize, cols: usize, rows: usize },
}

/// Provides getters pertaining to the vertex-size of a multigraph
pub trait MultigraphOrder {
    /// Returns the number of vertices of the multigraph
    fn number_of_vertices(&self) -> NumNodes;

    /// Returns the number of vertices as usize
    fn len(&self) -> usize {
        self.number_of_vertices() as usize
    }

    /// Returns an iterator over V.
    ///
    /// The range does not borrow `self` and hence may be used where additional
    /// mutable references of `self` are needed.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_vertices()
    }

    /// Returns *true* if the multigraph has no vertices (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Traits pertaining getters for multiplicities, neighborhoods & degrees.
///
/// Only [`MultigraphOps::multiplicity`] and [`MultigraphOps::neighbors_of`]
/// are required; everything else is derived so that representations with
/// better bookkeeping (see `DegreeCachedMultigraph`) can override single
/// methods without changing observable behavior.
pub trait MultigraphOps: MultigraphOrder {
    /// Returns the number of parallel edges from `u` to `v`.
    /// ** Panics if `u >= n || v >= n` **
    fn multiplicity(&self, u: Node, v: Node) -> Multiplicity;

    type NeighborIter<'a>: Iterator<Item = Node> + 'a
    where
        Self: 'a;

    /// Returns an iterator over the out-neighborhood of a given vertex:
    /// all `v` with `multiplicity(u, v) > 0`. Multiplicities are discarded,
    /// only presence matters.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_>;

    /// Returns *true* if at least one edge `(u, v)` exists.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.multiplicity(u, v) > 0
    }

    /// Returns the out-degree of `u`, counting multiplicities (row sum).
    /// ** Panics if `u >= n` **
    fn out_degree_of(&self, u: Node) -> Multiplicity {
        self.vertices().map(|v| self.multiplicity(u, v)).sum()
    }

    /// Returns an iterator over all out-degrees
    fn out_degrees(&self) -> impl Iterator<Item = Multiplicity> + '_ {
        self.vertices().map(|u| self.out_degree_of(u))
    }

    /// Returns the number of edges of the multigraph, counting multiplicities
    fn number_of_edges(&self) -> NumEdges {
        self.out_degrees().sum()
    }

    /// Returns the maximum out-degree in the multigraph
    fn max_out_degree(&self) -> Multiplicity {
        self.out_degrees().max().unwrap_or(0)
    }

    /// Returns the [`GraphSize`] triple `(vertices, edges, max_out_degree)`
    /// used as the lexicographic "is this graph bigger" comparator.
    fn size(&self) -> GraphSize {
        let mut edges = 0;
        let mut max_out_degree = 0;
        for degree in self.out_degrees() {
            edges += degree;
            max_out_degree = max_out_degree.max(degree);
        }
        GraphSize::new(self.number_of_vertices(), edges, max_out_degree)
    }

    /// Returns a copy of the multigraph as a dense multiplicity matrix
    fn to_matrix(&self) -> Vec<Vec<Multiplicity>> {
        self.vertices()
            .map(|u| self.vertices().map(|v| self.multiplicity(u, v)).collect())
            .collect()
    }
}

/// Trait for creating a new multigraph
pub trait MultigraphNew: Sized {
    /// Creates a multigraph with `n` vertices and no edges
    fn new(n: NumNodes) -> Self;

    /// Creates a multigraph from an explicit multiplicity matrix.
    /// Fails with [`MultigraphError::NonSquare`] if any row length differs
    /// from the number of rows. An empty matrix yields the empty graph.
    fn from_matrix(matrix: Vec<Vec<Multiplicity>>) -> Result<Self, MultigraphError>;
}

/// Provides functions to insert/delete edges.
///
/// The vertex count of a multigraph is immutable once constructed: removal
/// operations only isolate vertices, they never shrink the graph.
pub trait MultigraphEditing: MultigraphOps {
    /// Adds one parallel edge `(u, v)`, incrementing its multiplicity.
    /// ** Panics if `u >= n || v >= n` **
    fn add_edge(&mut self, u: Node, v: Node);

    /// Adds all edges in the collection, one multiplicity each
    fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<Edge>>) {
        for Edge(u, v) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v);
        }
    }

    /// Overwrites the multiplicity of the pair `(u, v)`.
    /// ** Panics if `u >= n || v >= n` **
    fn set_multiplicity(&mut self, u: Node, v: Node, m: Multiplicity);

    /// Removes all edges into and out of `u`, i.e. zeroes row and column `u`.
    /// The vertex itself remains (isolated).
    /// ** Panics if `u >= n` **
    fn remove_edges_at_vertex(&mut self, u: Node);
}

/// A trait for deriving new multigraphs from an existing one.
///
/// All constructions are pure: the receiver is never mutated, results are
/// freshly allocated value copies. The output type is generic so that e.g.
/// a degree-cached graph can derive a plain dense working copy.
pub trait Subgraphs: MultigraphOps + Sized {
    /// Creates the **vertex-induced subgraph** on `vertices`, re-indexed to
    /// `0..vertices.len()` in the given order, preserving multiplicities.
    fn vertex_induced_as<GO>(&self, vertices: &[Node]) -> GO
    where
        GO: MultigraphNew + MultigraphEditing,
    {
        let mut sub = GO::new(vertices.len() as NumNodes);
        for (new_u, &old_u) in vertices.iter().enumerate() {
            for (new_v, &old_v) in vertices.iter().enumerate() {
                let m = self.multiplicity(old_u, old_v);
                if m > 0 {
                    sub.set_multiplicity(new_u as Node, new_v as Node, m);
                }
            }
        }
        sub
    }

    /// Same as [`Subgraphs::vertex_induced_as`] with `GO = Self`
    fn vertex_induced(&self, vertices: &[Node]) -> Self
    where
        Self: MultigraphNew + MultigraphEditing,
    {
        self.vertex_induced_as(vertices)
    }

    /// Projects a **closed walk** `[v0, .., vk]` with `vk == v0` onto a fresh
    /// `(len - 1)`-vertex multigraph carrying only the consecutive edges of
    /// the walk with their multiplicities in `self`, zero elsewhere.
    ///
    /// The walk must visit each vertex at most once apart from the closing
    /// repetition (an elementary cycle).
    /// ** Panics if the walk is not closed **
    fn walk_subgraph_as<GO>(&self, walk: &[Node]) -> GO
    where
        GO: MultigraphNew + MultigraphEditing,
    {
        if walk.len() < 2 {
            return GO::new(0);
        }
        assert_eq!(
            walk.first(),
            walk.last(),
            "walk must end at its starting vertex"
        );

        let nodes = &walk[..walk.len() - 1];
        let mut sub = GO::new(nodes.len() as NumNodes);
        for (i, &u) in nodes.iter().enumerate() {
            let v = walk[i + 1];
            let new_v = if i + 1 == nodes.len() { 0 } else { (i + 1) as Node };
            let m = self.multiplicity(u, v);
            if m > 0 {
                sub.set_multiplicity(i as Node, new_v, m);
            }
        }
        sub
    }

    /// Same as [`Subgraphs::walk_subgraph_as`] with `GO = Self`
    fn walk_subgraph(&self, walk: &[Node]) -> Self
    where
        Self: MultigraphNew + MultigraphEditing,
    {
        self.walk_subgraph_as(walk)
    }

    /// Returns a copy with every multiplicity `< k` zeroed: the threshold
    /// filter. `threshold_as(0)` is the identity and the operation is
    /// idempotent for any fixed `k`.
    fn threshold_as<GO>(&self, k: Multiplicity) -> GO
    where
        GO: MultigraphNew + MultigraphEditing,
    {
        let mut filtered = GO::new(self.number_of_vertices());
        for u in self.vertices() {
            for v in self.vertices() {
                let m = self.multiplicity(u, v);
                if m >= k && m > 0 {
                    filtered.set_multiplicity(u, v, m);
                }
            }
        }
        filtered
    }

    /// Same as [`Subgraphs::threshold_as`] with `GO = Self`
    fn threshold(&self, k: Multiplicity) -> Self
    where
        Self: MultigraphNew + MultigraphEditing,
    {
        self.threshold_as(k)
    }
}

impl<G: MultigraphOps + Sized> Subgraphs for G {}
