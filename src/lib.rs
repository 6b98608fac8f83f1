/*!
`mgraphs` is a data structure & algorithms library for directed **multigraphs**:
graphs where every ordered vertex pair carries an integer edge multiplicity.

# Representation

We represent **vertices** as `u32` in the range `0..n` where `n` is the number of vertices
in the multigraph. Multiplicities are `u64`, stored in a dense `n * n` matrix, so the library
targets graphs whose adjacency matrix fits in memory rather than sparse giants.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`; adding an edge raises the
multiplicity of its pair by one.

### Available Representations

See the [`repr`] module for the graph storage backends:

- [`DenseMultigraph`](crate::repr::DenseMultigraph)
- [`DegreeCachedMultigraph`](crate::repr::DegreeCachedMultigraph)

Both answer every query identically; the cached variant trades O(n) memory for O(1)
out-degree lookups, which pays off in search loops that compare [`GraphSize`] triples often.

# Design

All algorithms/generators are provided as configurable structs that one can alter to their
needs using either the *Builder* / *Setter* pattern before calling the configured algorithm
on a provided multigraph. Alternatively, the most commonly used functionalities are
implemented via traits on the multigraph itself, making them usable without configuring the
algorithm beforehand.

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes definitions for vertices, edges, sizes, basic multigraph operations,
  and the standard representations,
- [`algo`] includes the solver suite: strongly connected components, maximum cycle search
  under a multiplicity threshold, asymmetric TSP (exact and heuristic), maximum flow, the
  k-Hamiltonian extension built from those, and exact/heuristic distance metrics,
- [`gens`] includes random multigraph generation and deterministic substructures
  (walks, cycles) for building instances at runtime.

In most use-cases, `use mgraphs::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod edge;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
pub mod size;
pub(crate) mod testing;

/// `mgraphs::prelude` includes definitions for vertices, edges and sizes, all basic
/// multigraph operation traits as well as all implemented representations.
pub mod prelude {
    pub use super::{edge::*, node::*, ops::*, repr::*, size::*};
}

pub use prelude::*;
