/*!
# Node & Multiplicity Representation

We choose `Node = u32` as almost all use-cases involve far less than `2^32` vertices.
This saves space compared to `usize`/`u64` and allows manipulating vertex values directly.

Edge **multiplicities** on the other hand are `u64`: a single vertex pair may carry an
arbitrary number of parallel edges (e.g. after a `k`-fold augmentation), and row sums of
a dense multiplicity matrix quickly exceed `u32`.
*/

/// Vertices can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` vertices in a multigraph!
pub type NumNodes = Node;

/// Number of parallel edges on a single ordered vertex pair
pub type Multiplicity = u64;

/// Total number of edges in a multigraph, i.e. the sum of all multiplicities
pub type NumEdges = u64;
