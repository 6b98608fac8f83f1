/*!
Dense matrix representation of a directed multigraph.

Every ordered pair of vertices stores its multiplicity directly, so edge
lookups and updates are constant time at quadratic memory cost. This is the
default representation for the algorithms in this crate, which all operate
on small to medium n but query multiplicities heavily.
*/

use crate::*;

/// A directed multigraph backed by an `n * n` multiplicity matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMultigraph {
    matrix: Vec<Vec<Multiplicity>>,
}

/// Iterator over the out-neighbors stored in one matrix row
pub struct RowNeighbors<'a> {
    row: std::iter::Enumerate<std::slice::Iter<'a, Multiplicity>>,
}

impl Iterator for RowNeighbors<'_> {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.row
            .by_ref()
            .find(|(_, &m)| m > 0)
            .map(|(v, _)| v as Node)
    }
}

impl MultigraphOrder for DenseMultigraph {
    fn number_of_vertices(&self) -> NumNodes {
        self.matrix.len() as NumNodes
    }
}

impl MultigraphOps for DenseMultigraph {
    fn multiplicity(&self, u: Node, v: Node) -> Multiplicity {
        self.matrix[u as usize][v as usize]
    }

    type NeighborIter<'a> = RowNeighbors<'a>;

    fn neighbors_of(&self, u: Node) -> Self::NeighborIter<'_> {
        RowNeighbors {
            row: self.matrix[u as usize].iter().enumerate(),
        }
    }

    fn out_degree_of(&self, u: Node) -> Multiplicity {
        self.matrix[u as usize].iter().sum()
    }

    fn to_matrix(&self) -> Vec<Vec<Multiplicity>> {
        self.matrix.clone()
    }
}

impl MultigraphNew for DenseMultigraph {
    fn new(n: NumNodes) -> Self {
        Self {
            matrix: vec![vec![0; n as usize]; n as usize],
        }
    }

    fn from_matrix(matrix: Vec<Vec<Multiplicity>>) -> Result<Self, MultigraphError> {
        let rows = matrix.len();
        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != rows {
                return Err(MultigraphError::NonSquare {
                    row,
                    cols: entries.len(),
                    rows,
                });
            }
        }
        Ok(Self { matrix })
    }
}

impl MultigraphEditing for DenseMultigraph {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.matrix[u as usize][v as usize] += 1;
    }

    fn set_multiplicity(&mut self, u: Node, v: Node, m: Multiplicity) {
        self.matrix[u as usize][v as usize] = m;
    }

    fn remove_edges_at_vertex(&mut self, u: Node) {
        self.matrix[u as usize].fill(0);
        for row in &mut self.matrix {
            row[u as usize] = 0;
        }
    }
}

crate::testing::test_multigraph_ops!(dense_ops, DenseMultigraph);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_matrix_rejects_ragged_input() {
        let res = DenseMultigraph::from_matrix(vec![vec![0, 1], vec![2]]);
        assert_eq!(
            res,
            Err(MultigraphError::NonSquare {
                row: 1,
                cols: 1,
                rows: 2
            })
        );
    }

    #[test]
    fn from_matrix_accepts_empty() {
        let g = DenseMultigraph::from_matrix(Vec::new()).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.number_of_edges(), 0);
    }
}
