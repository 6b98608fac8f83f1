/*!
Concrete multigraph representations.

All representations implement the trait suite from [`crate::ops`] and are
interchangeable wherever the algorithms are generic over `MultigraphOps`.
*/

pub mod dense;
pub mod degree_cached;

pub use dense::DenseMultigraph;
pub use degree_cached::DegreeCachedMultigraph;
