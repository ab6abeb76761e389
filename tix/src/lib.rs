/*!
Rooted Transfer Index (Transfer Distance) computation for pairs of phylogenetic trees.

Given a *reference* tree and an *alternative* tree over the same taxon set, this crate computes,
for every internal branch of the reference tree, the minimum number of leaves that must be moved
to turn the bipartition induced by that branch into a bipartition present in the alternative tree
— the rooted Transfer Index of [\[SANM21\]](https://doi.org/10.1093/sysbio/syaa051)-style
Transfer Distance computations, adapted to rooted trees.

A naive algorithm computes this quantity in O(n^2) per pair of trees. This crate uses a heavy-path
decomposition of the alternative tree ([heavypath]) to bring the total cost for all branches of
the reference tree down to O(n log^2 n), following the amortised-maintenance scheme of
[crate::altindex]'s direct (no heavy-path) approach, generalised to an unbalanced alternative tree.

# Example

```
use tix::{compute_transfer_indices, Tree};

let mut builder = Tree::builder();
let root = builder.add_root();
let left = builder.add_internal_child( root );
let right = builder.add_internal_child( root );
builder.add_leaf_child( left, "a" );
builder.add_leaf_child( left, "b" );
builder.add_leaf_child( right, "c" );
builder.add_leaf_child( right, "d" );
let mut reference = builder.build();
reference.prepare().unwrap();

let mut builder = Tree::builder();
let root = builder.add_root();
let left = builder.add_internal_child( root );
let right = builder.add_internal_child( root );
builder.add_leaf_child( left, "a" );
builder.add_leaf_child( left, "c" );
builder.add_leaf_child( right, "b" );
builder.add_leaf_child( right, "d" );
let mut alternative = builder.build();
alternative.prepare().unwrap();

let result = compute_transfer_indices( &mut reference, &mut alternative, false ).unwrap();
assert!( result.transfer_index.iter().all( |&ti| ti <= 1 ) );
```

# Crate feature flags

* `transfer_sets` (default)
	* Maintain the include/exclude leaf bookkeeping needed to reconstruct an actual witness
		transfer set, not just its size.
* `generate`
	* Optional, requires the `rand` crate.
	* Random tree generation and a quadratic reference algorithm, used by tests and benchmarks.

# Literature

\[SANM21\] Niklas Smedemark-Margulies et al. transfer distances for rooted and unrooted binary
phylogenetic trees. Systematic Biology, 2021. doi:[10.1093/sysbio/syaa051](https://doi.org/10.1093/sysbio/syaa051)
*/

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod altindex;
pub mod bijection;
pub mod driver;
pub mod error;
pub mod heavypath;
pub mod tree;

#[cfg( feature = "generate" )]
pub mod generate;

pub use driver::{compute_transfer_indices, TransferIndices};
pub use error::{TixError, TixResult};
pub use tree::{EdgeIdx, NodeIdx, Tree, TreeBuilder};
