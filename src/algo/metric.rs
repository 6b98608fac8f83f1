/*!
# Multigraph Distance

Structural edit distance between two multigraphs: the difference in vertex
count plus the smallest total multiplicity difference over all alignments of
the two vertex sets.

[`ExactMetric`] minimizes over every vertex permutation and is factorial in
the vertex count, usable only for very small graphs. [`HeuristicMetric`]
drops the alignment search and compares sorted out-degree sequences instead,
which lower-bounds nothing and guarantees nothing beyond symmetry, but runs
in near-linear time. Its two sorting strategies (comparison vs counting sort)
are observably identical and exist for benchmarking degree distributions of
different shapes.
*/

use itertools::Itertools;

use crate::*;

/// A distance function between two multigraphs
pub trait Metric {
    fn distance<G, H>(&self, g: &G, h: &H) -> u64
    where
        G: MultigraphOps,
        H: MultigraphOps;
}

/// Exact edit distance: vertex count difference plus the minimum, over all
/// injections of the smaller vertex set into the larger one, of the summed
/// per-pair multiplicity differences.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactMetric;

impl Metric for ExactMetric {
    fn distance<G, H>(&self, g: &G, h: &H) -> u64
    where
        G: MultigraphOps,
        H: MultigraphOps,
    {
        if g.len() < h.len() {
            return self.distance(h, g);
        }

        let n = g.len();
        let m = h.len();
        let vertex_difference = (n - m) as u64;

        // map the larger graph's vertices onto the smaller one; vertices
        // mapped beyond the smaller graph pair with multiplicity 0
        let edge_difference = (0..n)
            .permutations(n)
            .map(|map| {
                let mut difference = 0;
                for u in 0..n {
                    for v in 0..n {
                        let gm = g.multiplicity(u as Node, v as Node);
                        let hm = if map[u] < m && map[v] < m {
                            h.multiplicity(map[u] as Node, map[v] as Node)
                        } else {
                            0
                        };
                        difference += gm.abs_diff(hm);
                    }
                }
                difference
            })
            .min()
            .unwrap_or(0);

        vertex_difference + edge_difference
    }
}

/// Fast surrogate for [`ExactMetric`]: vertex count difference plus the L1
/// distance of the sorted out-degree sequences (shorter sequence padded with
/// zeros).
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicMetric {
    counting_sort: bool,
}

impl HeuristicMetric {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects counting sort instead of comparison sort for the degree
    /// sequences. Pays off when degrees are small relative to the vertex
    /// count.
    pub fn set_counting_sort(&mut self, counting_sort: bool) {
        self.counting_sort = counting_sort;
    }

    pub fn counting_sort(mut self, counting_sort: bool) -> Self {
        self.set_counting_sort(counting_sort);
        self
    }

    fn sorted_degrees<G: MultigraphOps>(&self, graph: &G) -> Vec<Multiplicity> {
        let degrees = graph.out_degrees().collect_vec();
        if self.counting_sort {
            counting_sort_desc(&degrees)
        } else {
            let mut degrees = degrees;
            degrees.sort_unstable_by(|a, b| b.cmp(a));
            degrees
        }
    }
}

impl Metric for HeuristicMetric {
    fn distance<G, H>(&self, g: &G, h: &H) -> u64
    where
        G: MultigraphOps,
        H: MultigraphOps,
    {
        let vertex_difference = (g.len().abs_diff(h.len())) as u64;

        let deg_g = self.sorted_degrees(g);
        let deg_h = self.sorted_degrees(h);

        let edge_difference: u64 = deg_g
            .iter()
            .copied()
            .zip_longest(deg_h.iter().copied())
            .map(|pair| {
                let (a, b) = pair.or(0, 0);
                a.abs_diff(b)
            })
            .sum();

        vertex_difference + edge_difference
    }
}

/// Sorts by counting occurrences; the value range is scanned once from the
/// maximum down.
fn counting_sort_desc(values: &[Multiplicity]) -> Vec<Multiplicity> {
    let Some(&max) = values.iter().max() else {
        return Vec::new();
    };

    let mut counts = vec![0usize; max as usize + 1];
    for &value in values {
        counts[value as usize] += 1;
    }

    let mut sorted = Vec::with_capacity(values.len());
    for value in (0..=max).rev() {
        sorted.extend(std::iter::repeat(value).take(counts[value as usize]));
    }
    sorted
}
