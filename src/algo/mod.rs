/*!
# Multigraph Algorithms

This module provides the solver suite built on top of the multigraph
representations in this crate. All algorithms are re-exported at the top
level of this module, so you can simply do:
```rust
use mgraphs::algo::*;
```
and gain access to connectivity, cycle search, tour optimization, max-flow
and the distance metrics. Where it fits, algorithms are provided as
**iterators** (e.g. the SCC decomposition), making it easy to consume
results lazily.
*/

mod atsp;
mod flow;
mod hamilton;
mod max_cycle;
mod metric;
mod scc;

use crate::prelude::*;

pub use atsp::*;
pub use flow::*;
pub use hamilton::*;
pub use max_cycle::*;
pub use metric::*;
pub use scc::*;
