/*!
# Maximum Cycle Search

Finds the largest elementary cycle(s) of a directed multigraph after
discarding all edges with multiplicity below a threshold `k`.

The exact search is SCC-driven Johnson-style enumeration: inside one strongly
connected component, a DFS with a blocked set and a blocked map walks all
elementary cycles through the component's least vertex, then that vertex's
edges are removed from the working graph and the decomposition is recomputed.
Components too small to beat the best cycle found so far are pruned, which
keeps the (worst-case exponential) enumeration practical on graphs whose
cycle structure collapses quickly.

Candidates compete in two stages. During the search only the vertex count
matters. Afterwards every recorded cycle is projected back onto the original
(unfiltered) multigraph and re-scored with the full [`GraphSize`] triple,
because the threshold filter hides multiplicities that distinguish
structurally equal cycles.
*/

use std::cmp::Reverse;

use fxhash::{FxHashMap, FxHashSet};
use itertools::Itertools;
use smallvec::SmallVec;

use super::*;

/// Outcome of a cycle search: the best closed walks (in original vertex ids,
/// first vertex repeated at the end) and their common size on the unfiltered
/// multigraph. `size` is `None` iff no cycle was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSearchResult {
    pub cycles: Vec<Vec<Node>>,
    pub size: Option<GraphSize>,
}

/// Convenience entry points for [`MaxCycleSearch`]
pub trait MaxCycles: MultigraphOps + Sized {
    /// Enumerates all largest cycles that survive the multiplicity threshold `k`
    fn max_cycles(&self, k: Multiplicity) -> CycleSearchResult {
        MaxCycleSearch::new(self, k).solve()
    }

    /// Cheap approximation of [`MaxCycles::max_cycles`], one candidate per SCC
    fn max_cycles_approximate(&self, k: Multiplicity) -> CycleSearchResult {
        MaxCycleSearch::new(self, k).approximate()
    }
}

impl<G: MultigraphOps + Sized> MaxCycles for G {}

/// One cycle search over a fixed input multigraph and threshold.
///
/// Owns a thresholded working copy that is destroyed during the search; the
/// input graph is only read again for the final re-scoring.
pub struct MaxCycleSearch<'a, G>
where
    G: MultigraphOps,
{
    original: &'a G,
    working: DenseMultigraph,

    /// Length of the best closed walk found so far (vertex count + 1)
    best_len: usize,
    cycles: Vec<Vec<Node>>,

    // Johnson search state, reset per component
    blocked: FxHashSet<Node>,
    blocked_map: FxHashMap<Node, SmallVec<[Node; 4]>>,
    stack: Vec<Node>,
}

impl<'a, G> MaxCycleSearch<'a, G>
where
    G: MultigraphOps,
{
    pub fn new(graph: &'a G, k: Multiplicity) -> Self {
        Self {
            original: graph,
            working: graph.threshold_as(k),
            best_len: 0,
            cycles: Vec::new(),
            blocked: FxHashSet::default(),
            blocked_map: FxHashMap::default(),
            stack: Vec::new(),
        }
    }

    /// Exact search. Consumes the searcher since the working graph is
    /// destroyed along the way.
    pub fn solve(mut self) -> CycleSearchResult {
        loop {
            let mut components = self
                .working
                .strongly_connected_components_no_singletons()
                .filter(|scc| scc.len() > 1)
                .collect_vec();

            if components.is_empty() {
                break;
            }

            components.sort_by_key(|scc| Reverse(scc.len()));
            let mut component = components.swap_remove(0);

            // even the largest component cannot beat the best cycle anymore
            if component.len() + 1 < self.best_len {
                break;
            }

            component.sort_unstable();
            log::debug!("searching component of {} vertices", component.len());
            self.search_component(&component);

            // all cycles through the least vertex are known now
            self.working.remove_edges_at_vertex(component[0]);
        }

        self.filter_best()
    }

    /// O(V + E) approximation: instead of enumerating elementary cycles, each
    /// maximum-cardinality SCC is closed into a single candidate walk by
    /// appending its first vertex. Completeness is traded away; the re-scoring
    /// stage is shared with [`MaxCycleSearch::solve`].
    pub fn approximate(mut self) -> CycleSearchResult {
        let components = self
            .working
            .strongly_connected_components_no_singletons()
            .filter(|scc| scc.len() > 1)
            .collect_vec();

        let max_len = components.iter().map(|scc| scc.len()).max().unwrap_or(0);

        for mut component in components {
            if component.len() == max_len {
                component.push(component[0]);
                self.cycles.push(component);
            }
        }

        self.filter_best()
    }

    /// Enumerates all elementary cycles through the least vertex of `component`
    /// (which must be sorted ascending), recording those that can still tie or
    /// beat the best vertex count.
    fn search_component(&mut self, component: &[Node]) {
        self.blocked.clear();
        self.blocked_map.clear();
        self.stack.clear();

        let induced: DenseMultigraph = self.working.vertex_induced_as(component);
        self.search_vertex(0, &induced, component);
    }

    /// DFS step on the induced subgraph. Returns whether any cycle closing at
    /// vertex 0 was found through `v`.
    ///
    /// Blocking discipline: a vertex stays blocked after its subtree is
    /// exhausted without a cycle, and registers itself with each neighbor in
    /// the blocked map. Finding a cycle unblocks the path vertex and,
    /// transitively, everything whose blocking depended on it, since new
    /// continuations may now exist.
    fn search_vertex(&mut self, v: Node, induced: &DenseMultigraph, component: &[Node]) -> bool {
        let mut found_cycle = false;
        self.stack.push(v);
        self.blocked.insert(v);

        for w in induced.neighbors_of(v) {
            if w == 0 {
                found_cycle = true;

                if self.stack.len() + 1 >= self.best_len {
                    let mut cycle = self
                        .stack
                        .iter()
                        .map(|&u| component[u as usize])
                        .collect_vec();
                    cycle.push(component[0]);

                    self.best_len = cycle.len();
                    self.cycles.push(cycle);
                }
            } else if !self.blocked.contains(&w) {
                found_cycle |= self.search_vertex(w, induced, component);
            }
        }

        if found_cycle {
            self.unblock(v);
        } else {
            for w in induced.neighbors_of(v) {
                self.blocked_map.entry(w).or_default().push(v);
            }
        }

        self.stack.pop();
        found_cycle
    }

    fn unblock(&mut self, v: Node) {
        self.blocked.remove(&v);
        if let Some(dependents) = self.blocked_map.remove(&v) {
            for u in dependents {
                if self.blocked.contains(&u) {
                    self.unblock(u);
                }
            }
        }
    }

    /// Re-scores every recorded closed walk on the unfiltered input graph and
    /// keeps only those attaining the maximum [`GraphSize`].
    fn filter_best(self) -> CycleSearchResult {
        let scored = self
            .cycles
            .into_iter()
            .map(|cycle| {
                let size = self
                    .original
                    .walk_subgraph_as::<DenseMultigraph>(&cycle)
                    .size();
                (cycle, size)
            })
            .collect_vec();

        let Some(best) = scored.iter().map(|(_, size)| *size).max() else {
            return CycleSearchResult {
                cycles: Vec::new(),
                size: None,
            };
        };

        CycleSearchResult {
            cycles: scored
                .into_iter()
                .filter(|&(_, size)| size == best)
                .map(|(cycle, _)| cycle)
                .collect(),
            size: Some(best),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gens::GeneratorSubstructures;

    fn graph_with_edges(
        n: NumNodes,
        edges: impl IntoIterator<Item = (Node, Node)>,
    ) -> DenseMultigraph {
        let mut graph = DenseMultigraph::new(n);
        graph.add_edges(edges);
        graph
    }

    #[test]
    fn single_triangle() {
        let graph = graph_with_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let result = graph.max_cycles(1);

        assert_eq!(result.cycles, vec![vec![0, 1, 2, 0]]);
        assert_eq!(result.size, Some(GraphSize::new(3, 3, 1)));
    }

    #[test]
    fn empty_graph_and_dag_yield_no_cycle() {
        let empty = DenseMultigraph::new(0);
        assert_eq!(empty.max_cycles(1).size, None);

        let dag = graph_with_edges(4, [(0, 1), (0, 2), (1, 3), (2, 3)]);
        let result = dag.max_cycles(1);
        assert!(result.cycles.is_empty());
        assert_eq!(result.size, None);

        let approx = dag.max_cycles_approximate(1);
        assert!(approx.cycles.is_empty());
    }

    #[test]
    fn threshold_discards_light_cycles() {
        // heavy triangle (multiplicity 2) plus a longer light 4-cycle
        let mut graph = DenseMultigraph::new(7);
        graph.connect_cycle([0, 1, 2]);
        graph.connect_cycle([0, 1, 2]);
        graph.connect_cycle([3, 4, 5, 6]);

        let heavy = graph.max_cycles(2);
        assert_eq!(heavy.cycles, vec![vec![0, 1, 2, 0]]);
        assert_eq!(heavy.size, Some(GraphSize::new(3, 6, 2)));

        // without the threshold the longer cycle wins on vertex count
        let all = graph.max_cycles(1);
        assert_eq!(all.cycles, vec![vec![3, 4, 5, 6, 3]]);
        assert_eq!(all.size, Some(GraphSize::new(4, 4, 1)));
    }

    #[test]
    fn multiplicities_break_vertex_count_ties() {
        // two disjoint 2-cycles, the second carrying parallel edges
        let mut graph = graph_with_edges(4, [(0, 1), (1, 0), (2, 3), (3, 2)]);
        graph.set_multiplicity(2, 3, 5);

        let result = graph.max_cycles(1);
        assert_eq!(result.cycles, vec![vec![2, 3, 2]]);
        assert_eq!(result.size, Some(GraphSize::new(2, 6, 5)));
    }

    #[test]
    fn enumerates_all_best_cycles() {
        // two edge-disjoint triangles through vertex 0, equal in every respect
        let graph = graph_with_edges(5, [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);

        let mut result = graph.max_cycles(1);
        result.cycles.sort();
        assert_eq!(result.cycles, vec![vec![0, 1, 2, 0], vec![0, 3, 4, 0]]);
        assert_eq!(result.size, Some(GraphSize::new(3, 3, 1)));
    }

    #[test]
    fn finds_longest_cycle_in_overlapping_structure() {
        // a triangle nested inside a 5-cycle sharing vertices 0 and 2
        let graph = graph_with_edges(5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 0)]);

        let result = graph.max_cycles(1);
        assert_eq!(result.cycles, vec![vec![0, 1, 2, 3, 4, 0]]);
        assert_eq!(result.size, Some(GraphSize::new(5, 5, 1)));
    }

    #[test]
    fn best_cycle_in_smaller_component_survives_pruning() {
        // the larger component {0,1,2,3} only contains 2-cycles; the triangle
        // in the smaller component {4,5,6} must still be searched and win
        let graph = graph_with_edges(
            7,
            [
                (0, 1),
                (1, 0),
                (1, 2),
                (2, 1),
                (2, 3),
                (3, 2),
                (4, 5),
                (5, 6),
                (6, 4),
            ],
        );

        let result = graph.max_cycles(1);
        assert_eq!(result.cycles, vec![vec![4, 5, 6, 4]]);
        assert_eq!(result.size, Some(GraphSize::new(3, 3, 1)));
    }

    #[test]
    fn approximate_on_plain_cycle_matches_exact() {
        let mut graph = DenseMultigraph::new(6);
        graph.connect_cycle(0..6);

        let exact = graph.max_cycles(1);
        let approx = graph.max_cycles_approximate(1);

        assert_eq!(exact.size, Some(GraphSize::new(6, 6, 1)));
        assert_eq!(approx.size, exact.size);
        assert_eq!(approx.cycles.len(), 1);
        assert_eq!(approx.cycles[0].len(), 7);
    }
}
