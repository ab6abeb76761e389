//! Leaf bijection between a reference tree and an alternative tree on the same taxon set.
//!
//! Sort each tree's leaves by taxon name, then pair them positionally. After this runs,
//! `ref_tree.other(u)` is the leaf of `alt_tree` representing the same taxon as `u`, and vice
//! versa.

use crate::error::TixError;
use crate::tree::Tree;

/// Pair up the leaves of `ref_tree` and `alt_tree` by taxon name.
///
/// Both trees must already have the same number of leaves and the same multiset of taxon
/// names, or this returns [TixError::TaxonMismatch]. Neither tree needs [Tree::prepare] to
/// have run first; this only touches leaf names and the `other` pointer.
pub fn set_leaf_bijection( ref_tree : &mut Tree, alt_tree : &mut Tree ) -> Result<(), TixError> {
	let ref_leaves = ref_tree.leaves_sorted_by_name();
	let alt_leaves = alt_tree.leaves_sorted_by_name();

	if ref_leaves.len() != alt_leaves.len() {
		return Err( TixError::TaxonMismatch {
			message : format!(
				"reference tree has {} leaves, alternative tree has {}",
				ref_leaves.len(),
				alt_leaves.len()
			),
		} );
	}

	for (i, (&ru, &av)) in ref_leaves.iter().zip( alt_leaves.iter() ).enumerate() {
		let rname = ref_tree.name( ru );
		let aname = alt_tree.name( av );
		if rname != aname {
			return Err( TixError::TaxonMismatch {
				message : format!(
					"taxon name mismatch at sorted position {i}: {:?} (reference) vs. {:?} (alternative)",
					rname, aname
				),
			} );
		}
	}

	for (&ru, &av) in ref_leaves.iter().zip( alt_leaves.iter() ) {
		ref_tree.set_other( ru, av );
		alt_tree.set_other( av, ru );
	}

	Ok( () )
}
