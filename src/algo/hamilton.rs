/*!
# k-Hamiltonian Extension

Computes the minimal (or heuristically minimal) edge augmentation that makes
a multigraph admit a Hamiltonian ordering in which every consecutive pair has
combined multiplicity at least `k`, by reducing to asymmetric TSP over a
deficiency cost matrix. A companion flow construction estimates how many
vertex-disjoint Hamiltonian-like closures the augmented graph admits.
*/

use super::*;

/// Computes the k-Hamiltonian extension of `graph`.
///
/// The cost of stepping from `i` to `j` is the multiplicity deficit
/// `max(k - multiplicity(i, j), 0)` plus one, since the tour solvers require
/// every real edge to have strictly positive cost. The offset is removed
/// again from the solved tour, leaving a matrix whose non-zero entries are
/// exactly the parallel edges that must be added. A graph that already
/// carries multiplicity >= `k` on a full Hamiltonian cycle thus yields the
/// all-zero matrix.
///
/// Solver failures (no tour exists, instance too large for the exact solver)
/// are propagated unchanged.
pub fn k_hamiltonian_extension<G>(
    graph: &G,
    k: Multiplicity,
    approximate: bool,
) -> Result<Vec<Vec<Multiplicity>>, AtspError>
where
    G: MultigraphOps,
{
    let cost = graph
        .vertices()
        .map(|u| {
            graph
                .vertices()
                .map(|v| {
                    if u == v {
                        INFINITE_COST
                    } else {
                        k.saturating_sub(graph.multiplicity(u, v)) + 1
                    }
                })
                .collect()
        })
        .collect();

    let solver = AtspSolver::new(cost)?;
    let mut extension = if approximate {
        solver.approximate()?
    } else {
        solver.solve()?
    };

    // strip the +1 offset from the tour's edges
    for entry in extension.iter_mut().flatten() {
        if *entry > 0 {
            *entry -= 1;
        }
    }

    log::debug!(
        "k = {k} extension adds {} parallel edges",
        extension.iter().flatten().sum::<Multiplicity>()
    );

    Ok(extension)
}

/// Estimates how many vertex-disjoint Hamiltonian-like cycles the graph
/// augmented by `extension` admits, as a max-flow value.
///
/// Cutting any such cycle at its extension edges decomposes it into paths of
/// original edges, each starting at the target of one extension edge and
/// ending at the source of the next. A flow network models exactly these
/// paths: a synthetic source feeds every extension target, every extension
/// source drains into a synthetic sink, and every original edge that is not
/// itself an extension edge becomes a unit-capacity edge. A vertex acting as
/// both target and source of extension edges is split so a single flow path
/// cannot use it as entry and exit at once.
///
/// ** Panics if `extension` does not match the graph's vertex count **
pub fn count_hamiltonian_cycles<G>(graph: &G, extension: &[Vec<Multiplicity>]) -> Capacity
where
    G: MultigraphOps,
{
    let n = graph.len();
    assert_eq!(extension.len(), n);

    let x_out: Vec<bool> = (0..n).map(|u| extension[u].iter().any(|&m| m > 0)).collect();
    let x_in: Vec<bool> = (0..n)
        .map(|v| extension.iter().any(|row| row[v] > 0))
        .collect();

    // A split vertex keeps its outgoing edges under the original id; the
    // fresh in-copy inherits the incoming edges.
    let mut next_id = n as Node;
    let in_copy: Vec<Node> = (0..n)
        .map(|v| {
            if x_in[v] && x_out[v] {
                next_id += 1;
                next_id - 1
            } else {
                v as Node
            }
        })
        .collect();

    let source = next_id;
    let sink = next_id + 1;
    let mut network = FlowNetwork::new(sink + 1);

    for v in 0..n {
        if x_in[v] {
            // entry point: the flow continues along v's outgoing edges
            network.add_edge(source, v as Node, INFINITE_CAPACITY);
        }
        if x_out[v] {
            // exit point: the flow arrived along v's incoming edges
            network.add_edge(in_copy[v], sink, INFINITE_CAPACITY);
        }
    }

    for u in graph.vertices() {
        for v in graph.neighbors_of(u) {
            if extension[u as usize][v as usize] == 0 {
                network.add_edge(u, in_copy[v as usize], 1);
            }
        }
    }

    network.edmonds_karp(source, sink)
}
