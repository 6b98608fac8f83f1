/*!
# Asymmetric Traveling Salesman

Exact and heuristic tour solvers over a raw cost matrix. The cost matrix is
deliberately not multigraph-typed: callers derive costs from whatever domain
they work in (see [`crate::algo::hamilton`]) and get back an adjacency matrix
carrying only the tour's edges with their original costs.

The exact solver is Held-Karp dynamic programming with O(n^2 * 2^n) time and
space, feasible only for small instances. The heuristic is nearest-neighbor
construction followed by 2-opt local search adjusted for asymmetric costs:
reversing a tour segment flips the direction of every edge inside it, so the
improvement test tracks forward and reverse segment sums incrementally
instead of only comparing the two reconnected edges.
*/

use thiserror::Error;

use crate::*;

/// Cost of a single directed step in a tour
pub type Cost = u64;

/// Sentinel for "no edge". Never a valid finite cost.
pub const INFINITE_COST: Cost = Cost::MAX;

/// Square matrix of directed step costs
pub type CostMatrix = Vec<Vec<Cost>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AtspError {
    #[error("cost matrix must be square and non-empty")]
    MalformedMatrix,
    #[error("exact solver supports at most {max} vertices, got {n}")]
    TooLarge { n: usize, max: usize },
    #[error("no valid tour exists for the given cost matrix")]
    Infeasible,
}

/// Solver instance owning one cost matrix.
///
/// Both [`AtspSolver::solve`] and [`AtspSolver::approximate`] return the tour
/// as an adjacency matrix containing only the tour's edges with their
/// original costs, all other entries zero.
pub struct AtspSolver {
    cost: CostMatrix,
    n: usize,
}

impl AtspSolver {
    /// Creates a solver for the given cost matrix.
    /// Fails with [`AtspError::MalformedMatrix`] if the matrix is empty or
    /// not square.
    pub fn new(cost: CostMatrix) -> Result<Self, AtspError> {
        let n = cost.len();
        if n == 0 || cost.iter().any(|row| row.len() != n) {
            return Err(AtspError::MalformedMatrix);
        }
        Ok(Self { cost, n })
    }

    /// Exact Held-Karp solver.
    ///
    /// `dp[mask][v]` is the minimum cost of a path starting at vertex 0,
    /// visiting exactly the vertex set `mask`, ending at `v`. The answer
    /// closes the cheapest full path back to vertex 0; the tour itself is
    /// reconstructed from parent back-pointers.
    ///
    /// Fails with [`AtspError::Infeasible`] if no finite-cost tour exists and
    /// with [`AtspError::TooLarge`] if `n` exceeds the bitmask width.
    pub fn solve(&self) -> Result<CostMatrix, AtspError> {
        let n = self.n;
        let max = usize::BITS as usize - 1;
        if n > max {
            return Err(AtspError::TooLarge { n, max });
        }

        let full: usize = (1 << n) - 1;
        let mut dp = vec![vec![INFINITE_COST; n]; full + 1];
        let mut parent = vec![vec![INVALID_NODE; n]; full + 1];

        dp[1][0] = 0;

        for mask in 1..=full {
            // every path starts at vertex 0
            if mask & 1 == 0 {
                continue;
            }

            for u in 0..n {
                if mask & (1 << u) == 0 || dp[mask][u] == INFINITE_COST {
                    continue;
                }

                for v in 0..n {
                    if mask & (1 << v) != 0 || self.cost[u][v] == INFINITE_COST {
                        continue;
                    }

                    let new_mask = mask | (1 << v);
                    let new_cost = dp[mask][u].saturating_add(self.cost[u][v]);

                    if new_cost < dp[new_mask][v] {
                        dp[new_mask][v] = new_cost;
                        parent[new_mask][v] = u as Node;
                    }
                }
            }
        }

        // pick the end vertex whose closing edge back to 0 is cheapest
        let mut optimal_cost = INFINITE_COST;
        let mut last = 0;
        for v in 1..n {
            let closed = dp[full][v].saturating_add(self.cost[v][0]);
            if closed < optimal_cost {
                optimal_cost = closed;
                last = v;
            }
        }

        if optimal_cost == INFINITE_COST {
            return Err(AtspError::Infeasible);
        }

        let mut path = Vec::with_capacity(n);
        let mut mask = full;
        let mut current = last;
        loop {
            path.push(current as Node);
            let prev = parent[mask][current];
            mask &= !(1 << current);
            if prev == INVALID_NODE {
                debug_assert_eq!(current, 0);
                break;
            }
            current = prev as usize;
        }
        path.reverse();

        log::debug!("exact tour of cost {optimal_cost}: {path:?}");

        Ok(self.tour_matrix(&path))
    }

    /// Heuristic solver: nearest-neighbor seed tour, then repeated 2-opt
    /// sweeps until a sweep applies no reversal or `n` sweeps were made.
    /// Each sweep may apply many reversals.
    ///
    /// Never returns a tour costlier than the nearest-neighbor seed. Fails
    /// with [`AtspError::Infeasible`] if the seed construction gets stuck.
    pub fn approximate(&self) -> Result<CostMatrix, AtspError> {
        let mut tour = self.nearest_neighbor_tour()?;

        for _ in 0..self.n {
            if !self.two_opt_pass(&mut tour) {
                break;
            }
        }

        tour.pop();
        Ok(self.tour_matrix(&tour))
    }

    /// Greedy tour construction: always step to the cheapest unvisited
    /// vertex. Returns the closed walk `[0, .., 0]`.
    fn nearest_neighbor_tour(&self) -> Result<Vec<Node>, AtspError> {
        let n = self.n;
        let mut tour = Vec::with_capacity(n + 1);
        let mut visited = vec![false; n];

        let mut current = 0;
        tour.push(current as Node);
        visited[current] = true;

        for _ in 1..n {
            let mut nearest = None;
            let mut min_cost = INFINITE_COST;
            for v in 0..n {
                if !visited[v] && self.cost[current][v] < min_cost {
                    nearest = Some(v);
                    min_cost = self.cost[current][v];
                }
            }

            let Some(v) = nearest else {
                return Err(AtspError::Infeasible);
            };
            current = v;
            tour.push(current as Node);
            visited[current] = true;
        }

        if self.cost[current][0] == INFINITE_COST {
            return Err(AtspError::Infeasible);
        }
        tour.push(0);

        Ok(tour)
    }

    fn edge(&self, tour: &[Node], i: usize, j: usize) -> Cost {
        self.cost[tour[i] as usize][tour[j] as usize]
    }

    /// One full 2-opt sweep over the closed walk `tour` (first == last).
    /// Applies every strictly improving segment reversal it encounters and
    /// reports whether any was applied. A reversal invalidates the running
    /// sums, so the scan of the current segment start is re-seeded after
    /// each one.
    ///
    /// For a reversal of `tour[i..=j]`, the tour cost changes from
    /// `edge(i-1, i) + forward(i..=j) + edge(j, j+1)` to
    /// `edge(i-1, j) + reverse(i..=j) + edge(i, j+1)`, where the segment sums
    /// are maintained incrementally while `j` grows.
    fn two_opt_pass(&self, tour: &mut [Node]) -> bool {
        let len = tour.len();
        let mut improved = false;

        let mut i = 1;
        'segment: while i + 2 < len {
            let mut forward: Cost = 0;
            let mut reverse: Cost = 0;

            for j in (i + 1)..(len - 1) {
                forward = forward.saturating_add(self.edge(tour, j - 1, j));
                reverse = reverse.saturating_add(self.edge(tour, j, j - 1));

                let before = self
                    .edge(tour, i - 1, i)
                    .saturating_add(forward)
                    .saturating_add(self.edge(tour, j, j + 1));
                let after = self
                    .edge(tour, i - 1, j)
                    .saturating_add(reverse)
                    .saturating_add(self.edge(tour, i, j + 1));

                if after < before {
                    tour[i..=j].reverse();
                    improved = true;
                    continue 'segment;
                }
            }

            i += 1;
        }

        improved
    }

    /// Projects a tour onto an adjacency matrix carrying the tour's edges
    /// with their original costs.
    fn tour_matrix(&self, tour: &[Node]) -> CostMatrix {
        let mut result = vec![vec![0; self.n]; self.n];
        for window in tour.windows(2) {
            let (u, v) = (window[0] as usize, window[1] as usize);
            result[u][v] = self.cost[u][v];
        }
        let (u, v) = (tour[tour.len() - 1] as usize, tour[0] as usize);
        result[u][v] = self.cost[u][v];
        result
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    const INF: Cost = INFINITE_COST;

    fn tour_cost(matrix: &CostMatrix) -> Cost {
        matrix.iter().flatten().sum()
    }

    fn closed_walk_cost(cost: &CostMatrix, tour: &[Node]) -> Cost {
        tour.windows(2)
            .map(|w| cost[w[0] as usize][w[1] as usize])
            .sum()
    }

    fn assert_is_tour(matrix: &CostMatrix) {
        let n = matrix.len();
        for u in 0..n {
            assert_eq!(matrix[u].iter().filter(|&&c| c > 0).count(), 1);
            assert_eq!((0..n).filter(|&v| matrix[v][u] > 0).count(), 1);
        }
    }

    #[test]
    fn rejects_malformed_matrices() {
        assert_eq!(AtspSolver::new(vec![]).err(), Some(AtspError::MalformedMatrix));
        assert_eq!(
            AtspSolver::new(vec![vec![0, 1], vec![1]]).err(),
            Some(AtspError::MalformedMatrix)
        );
    }

    #[test]
    fn exact_on_unit_cycle() {
        // the only tour is 0 -> 1 -> 2 -> 3 -> 0 with cost 1 per edge
        let cost = vec![
            vec![INF, 1, INF, INF],
            vec![INF, INF, 1, INF],
            vec![INF, INF, INF, 1],
            vec![1, INF, INF, INF],
        ];
        let solver = AtspSolver::new(cost).unwrap();
        let tour = solver.solve().unwrap();

        assert_eq!(tour_cost(&tour), 4);
        assert_eq!(tour[0][1], 1);
        assert_eq!(tour[1][2], 1);
        assert_eq!(tour[2][3], 1);
        assert_eq!(tour[3][0], 1);
    }

    #[test]
    fn exact_picks_cheaper_of_two_cycles() {
        // both orientations of the triangle are tours; one is cheaper
        let cost = vec![
            vec![INF, 1, 10],
            vec![10, INF, 1],
            vec![1, 10, INF],
        ];
        let solver = AtspSolver::new(cost).unwrap();
        let tour = solver.solve().unwrap();

        assert_eq!(tour_cost(&tour), 3);
        assert_eq!(tour[0][1], 1);
        assert_eq!(tour[1][2], 1);
        assert_eq!(tour[2][0], 1);
    }

    #[test]
    fn exact_infeasible_without_closing_edge() {
        // a path 0 -> 1 -> 2 but no way back to 0
        let cost = vec![
            vec![INF, 1, INF],
            vec![INF, INF, 1],
            vec![INF, INF, INF],
        ];
        let solver = AtspSolver::new(cost).unwrap();
        assert_eq!(solver.solve().err(), Some(AtspError::Infeasible));
        assert_eq!(solver.approximate().err(), Some(AtspError::Infeasible));
    }

    #[test]
    fn approximate_matches_exact_on_unit_cycle() {
        let cost = vec![
            vec![INF, 1, INF, INF],
            vec![INF, INF, 1, INF],
            vec![INF, INF, INF, 1],
            vec![1, INF, INF, INF],
        ];
        let solver = AtspSolver::new(cost).unwrap();
        let tour = solver.approximate().unwrap();
        assert_eq!(tour_cost(&tour), 4);
        assert_is_tour(&tour);
    }

    #[test]
    fn approximate_never_worse_than_seed_tour() {
        let rng = &mut Pcg64Mcg::seed_from_u64(42);

        for n in [4usize, 6, 10, 16] {
            for _ in 0..10 {
                let cost: CostMatrix = (0..n)
                    .map(|u| {
                        (0..n)
                            .map(|v| if u == v { INF } else { rng.random_range(1..100) })
                            .collect()
                    })
                    .collect();

                let solver = AtspSolver::new(cost.clone()).unwrap();
                let seed = solver.nearest_neighbor_tour().unwrap();
                let improved = solver.approximate().unwrap();

                assert_is_tour(&improved);
                assert!(tour_cost(&improved) <= closed_walk_cost(&cost, &seed));
            }
        }
    }

    #[test]
    fn single_pass_applies_multiple_reversals() {
        // walking 0 -> 1 -> 2 -> 3 -> 4 -> 0 only uses cost-10 edges; the
        // cheap edges form 0 -> 2 -> 1 -> 4 -> 3 -> 0, reachable by two
        // disjoint adjacent swaps that one sweep must both perform
        let cost = vec![
            vec![INF, 10, 1, 10, 10],
            vec![10, INF, 10, 10, 1],
            vec![10, 1, INF, 10, 10],
            vec![1, 10, 10, INF, 10],
            vec![10, 10, 10, 1, INF],
        ];
        let solver = AtspSolver::new(cost).unwrap();

        let mut walk = vec![0, 1, 2, 3, 4, 0];
        assert!(solver.two_opt_pass(&mut walk));
        assert_eq!(walk, vec![0, 2, 1, 4, 3, 0]);
        assert!(!solver.two_opt_pass(&mut walk));
    }

    #[test]
    fn two_opt_untangles_asymmetric_detour() {
        // nearest-neighbor from 0 greedily picks 0 -> 1 -> 2 -> 3 -> 0
        // (cost 1 + 1 + 1 + 50), but 0 -> 1 -> 3 -> 2 -> 0 costs only 22
        let cost = vec![
            vec![INF, 1, 4, 9],
            vec![9, INF, 1, 3],
            vec![9, 2, INF, 1],
            vec![50, 9, 9, INF],
        ];

        let solver = AtspSolver::new(cost).unwrap();
        let tour = solver.approximate().unwrap();
        assert_is_tour(&tour);
        assert!(tour_cost(&tour) < 53);
    }
}
