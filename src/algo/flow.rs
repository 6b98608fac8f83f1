/*!
# Maximum Flow

This module provides a capacity-weighted flow network together with an
Edmonds-Karp style maximum flow computation (BFS augmenting paths).

The network is a standalone structure rather than a multigraph view: flow
instances are usually gadget constructions (vertex splits, artificial source
and sink) whose vertex set differs from any multigraph they were derived
from. See [`crate::algo::hamilton`] for the main in-crate construction.
*/

use std::collections::VecDeque;

use crate::*;

/// Edge capacity / flow value in a [`FlowNetwork`].
///
/// Signed so that the flow matrix can hold the skew-symmetric convention
/// `flow[u][v] == -flow[v][u]`.
pub type Capacity = i64;

/// Stand-in for an unbounded capacity. Half the integer range so that
/// augmenting along two such edges cannot overflow.
pub const INFINITE_CAPACITY: Capacity = Capacity::MAX / 2;

/// A directed flow network over vertices `0..n` with dense capacity and flow
/// matrices.
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    n: usize,
    capacity: Vec<Vec<Capacity>>,
    flow: Vec<Vec<Capacity>>,
}

impl FlowNetwork {
    /// Creates a network with `n` vertices and no capacities
    pub fn new(n: NumNodes) -> Self {
        let n = n as usize;
        Self {
            n,
            capacity: vec![vec![0; n]; n],
            flow: vec![vec![0; n]; n],
        }
    }

    /// Returns the number of vertices of the network
    pub fn number_of_vertices(&self) -> NumNodes {
        self.n as NumNodes
    }

    /// Adds capacity `c` to the edge `(u, v)`. Parallel additions accumulate.
    /// ** Panics if `u >= n || v >= n` **
    pub fn add_edge(&mut self, u: Node, v: Node, c: Capacity) {
        debug_assert!(c >= 0);
        self.capacity[u as usize][v as usize] =
            self.capacity[u as usize][v as usize].saturating_add(c);
    }

    /// Returns the flow currently routed along `(u, v)`; negative values
    /// indicate flow in the opposite direction.
    pub fn flow(&self, u: Node, v: Node) -> Capacity {
        self.flow[u as usize][v as usize]
    }

    /// Residual capacity of the edge `(u, v)`
    fn residual(&self, u: usize, v: usize) -> Capacity {
        self.capacity[u][v] - self.flow[u][v]
    }

    /// Performs BFS in the residual network to find a shortest augmenting
    /// path from `s` to `t`. Fills `parent` and returns whether `t` was
    /// reached.
    fn bfs(&self, s: Node, t: Node, parent: &mut [Node]) -> bool {
        parent.fill(INVALID_NODE);
        parent[s as usize] = s;

        let mut queue = VecDeque::with_capacity(self.n);
        queue.push_back(s as usize);

        while let Some(u) = queue.pop_front() {
            for v in 0..self.n {
                if parent[v] == INVALID_NODE && self.residual(u, v) > 0 {
                    parent[v] = u as Node;
                    if v == t as usize {
                        return true;
                    }
                    queue.push_back(v);
                }
            }
        }

        false
    }

    /// Computes the maximum `s`-`t` flow via Edmonds-Karp and returns its
    /// value. The routed flow remains stored and can be inspected via
    /// [`FlowNetwork::flow`].
    /// ** Panics if `s >= n || t >= n` **
    pub fn edmonds_karp(&mut self, s: Node, t: Node) -> Capacity {
        assert!((s as usize) < self.n && (t as usize) < self.n);
        if s == t {
            return 0;
        }

        let mut max_flow = 0;
        let mut parent = vec![INVALID_NODE; self.n];

        while self.bfs(s, t, &mut parent) {
            // bottleneck along the augmenting path
            let mut path_flow = Capacity::MAX;
            let mut v = t as usize;
            while v != s as usize {
                let u = parent[v] as usize;
                path_flow = path_flow.min(self.residual(u, v));
                v = u;
            }

            let mut v = t as usize;
            while v != s as usize {
                let u = parent[v] as usize;
                self.flow[u][v] += path_flow;
                self.flow[v][u] -= path_flow;
                v = u;
            }

            max_flow += path_flow;
        }

        log::debug!("max flow {s} -> {t}: {max_flow}");

        max_flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge() {
        let mut net = FlowNetwork::new(2);
        net.add_edge(0, 1, 7);
        assert_eq!(net.edmonds_karp(0, 1), 7);
        assert_eq!(net.flow(0, 1), 7);
        assert_eq!(net.flow(1, 0), -7);
    }

    #[test]
    fn diamond() {
        // two disjoint paths of capacity 1 each
        let mut net = FlowNetwork::new(4);
        net.add_edge(0, 1, 1);
        net.add_edge(0, 2, 1);
        net.add_edge(1, 3, 1);
        net.add_edge(2, 3, 1);
        assert_eq!(net.edmonds_karp(0, 3), 2);
    }

    #[test]
    fn bottleneck() {
        let mut net = FlowNetwork::new(4);
        net.add_edge(0, 1, INFINITE_CAPACITY);
        net.add_edge(1, 2, 3);
        net.add_edge(2, 3, INFINITE_CAPACITY);
        assert_eq!(net.edmonds_karp(0, 3), 3);
    }

    #[test]
    fn textbook_instance() {
        let mut net = FlowNetwork::new(6);
        net.add_edge(0, 1, 16);
        net.add_edge(0, 2, 13);
        net.add_edge(1, 3, 12);
        net.add_edge(2, 1, 4);
        net.add_edge(2, 4, 14);
        net.add_edge(3, 2, 9);
        net.add_edge(3, 5, 20);
        net.add_edge(4, 3, 7);
        net.add_edge(4, 5, 4);
        assert_eq!(net.edmonds_karp(0, 5), 23);
    }

    #[test]
    fn disconnected_target() {
        let mut net = FlowNetwork::new(3);
        net.add_edge(0, 1, 5);
        assert_eq!(net.edmonds_karp(0, 2), 0);
    }

    #[test]
    fn parallel_additions_accumulate() {
        let mut net = FlowNetwork::new(2);
        net.add_edge(0, 1, 2);
        net.add_edge(0, 1, 3);
        assert_eq!(net.edmonds_karp(0, 1), 5);
    }

    #[test]
    fn flow_is_skew_symmetric() {
        let mut net = FlowNetwork::new(5);
        net.add_edge(0, 1, 4);
        net.add_edge(1, 2, 3);
        net.add_edge(1, 3, 2);
        net.add_edge(2, 4, 3);
        net.add_edge(3, 4, 5);
        net.edmonds_karp(0, 4);

        for u in 0..5 {
            for v in 0..5 {
                assert_eq!(net.flow(u, v), -net.flow(v, u));
            }
        }
    }
}
