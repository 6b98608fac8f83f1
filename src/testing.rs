/// Every multigraph representation should pass the same trait-level checks.
/// The macro instantiates one `#[cfg(test)]` module per representation that
/// replays random edits against a plain reference matrix.
macro_rules! test_multigraph_ops {
    ($env:ident, $graph:ident) => {
        #[cfg(test)]
        mod $env {
            use crate::*;
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            fn random_matrix<R: Rng>(rng: &mut R, n: NumNodes) -> Vec<Vec<Multiplicity>> {
                (0..n)
                    .map(|_| (0..n).map(|_| rng.random_range(0..4)).collect())
                    .collect()
            }

            #[test]
            fn multigraph_new() {
                for n in 1..50 {
                    let graph = <$graph>::new(n);

                    assert_eq!(graph.number_of_vertices(), n);
                    assert_eq!(graph.number_of_edges(), 0);
                    assert_eq!(graph.max_out_degree(), 0);
                    assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                }
            }

            #[test]
            fn multigraph_ops_match_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for n in [5 as NumNodes, 10, 20] {
                    for _ in 0..10 {
                        let matrix = random_matrix(rng, n);
                        let graph = <$graph>::from_matrix(matrix.clone()).unwrap();

                        for u in 0..n {
                            let row = &matrix[u as usize];
                            assert_eq!(graph.out_degree_of(u), row.iter().sum::<Multiplicity>());
                            assert_eq!(
                                graph.neighbors_of(u).collect_vec(),
                                (0..n).filter(|&v| row[v as usize] > 0).collect_vec()
                            );
                            for v in 0..n {
                                assert_eq!(graph.multiplicity(u, v), row[v as usize]);
                                assert_eq!(graph.has_edge(u, v), row[v as usize] > 0);
                            }
                        }

                        let m: NumEdges = matrix.iter().flatten().sum();
                        assert_eq!(graph.number_of_edges(), m);
                        assert_eq!(graph.to_matrix(), matrix);
                        assert_eq!(
                            graph.size(),
                            GraphSize::new(n, m, graph.max_out_degree())
                        );
                    }
                }
            }

            #[test]
            fn multigraph_editing_matches_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(4);

                for n in [5 as NumNodes, 10, 20] {
                    for _ in 0..10 {
                        let mut matrix = vec![vec![0 as Multiplicity; n as usize]; n as usize];
                        let mut graph = <$graph>::new(n);

                        for _ in 0..(n * 4) {
                            let u = rng.random_range(0..n);
                            let v = rng.random_range(0..n);
                            match rng.random_range(0..3) {
                                0 => {
                                    matrix[u as usize][v as usize] += 1;
                                    graph.add_edge(u, v);
                                }
                                1 => {
                                    let m = rng.random_range(0..6);
                                    matrix[u as usize][v as usize] = m;
                                    graph.set_multiplicity(u, v, m);
                                }
                                _ => {
                                    matrix[u as usize].fill(0);
                                    matrix.iter_mut().for_each(|row| row[u as usize] = 0);
                                    graph.remove_edges_at_vertex(u);
                                }
                            }

                            assert_eq!(graph.to_matrix(), matrix);
                            for w in 0..n {
                                assert_eq!(
                                    graph.out_degree_of(w),
                                    matrix[w as usize].iter().sum::<Multiplicity>()
                                );
                            }
                        }
                    }
                }
            }

            #[test]
            fn subgraph_constructions() {
                let rng = &mut Pcg64Mcg::seed_from_u64(5);

                for _ in 0..10 {
                    let n = rng.random_range(4..12 as NumNodes);
                    let graph = <$graph>::from_matrix(random_matrix(rng, n)).unwrap();

                    // Inducing on all vertices in original order is the identity.
                    let all = (0..n).collect_vec();
                    let same: $graph = graph.vertex_induced(&all);
                    assert_eq!(same, graph);

                    // Induced subgraph on a prefix of the vertices.
                    let keep = (0..n / 2).collect_vec();
                    let sub: $graph = graph.vertex_induced(&keep);
                    assert_eq!(sub.number_of_vertices(), keep.len() as NumNodes);
                    for (iu, &u) in keep.iter().enumerate() {
                        for (iv, &v) in keep.iter().enumerate() {
                            assert_eq!(
                                sub.multiplicity(iu as Node, iv as Node),
                                graph.multiplicity(u, v)
                            );
                        }
                    }

                    // Thresholding keeps exactly the entries >= k.
                    let k = rng.random_range(1..4);
                    let filtered: $graph = graph.threshold(k);
                    for u in 0..n {
                        for v in 0..n {
                            let m = graph.multiplicity(u, v);
                            let expected = if m >= k { m } else { 0 };
                            assert_eq!(filtered.multiplicity(u, v), expected);
                        }
                    }

                    // threshold(0) is the identity and thresholding is idempotent.
                    let untouched: $graph = graph.threshold(0);
                    assert_eq!(untouched, graph);
                    let twice: $graph = filtered.threshold(k);
                    assert_eq!(twice, filtered);
                }
            }
        }
    };
}

pub(crate) use test_multigraph_ops;
