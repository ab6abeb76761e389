//! Top-level driver: pairs a reference tree and an alternative tree and computes the rooted
//! Transfer Index for every internal branch of the reference tree.
//!
//! The driver never inspects the alternative tree's statistics directly; it only issues
//! `add_leaf`/`reset_leaf` calls (via [crate::heavypath::HeavyPathTree]) and reads back
//! `ti_min`/`ti_max`. All of the heavy-path amortisation on the *reference* side lives here: each
//! reference-tree node is visited exactly once across the whole run.

use tracing::{instrument, trace};

use crate::bijection::set_leaf_bijection;
use crate::error::TixError;
use crate::heavypath::{HeavyPathTree, Side};
use crate::tree::{EdgeIdx, NodeIdx, Tree};

/// Per-edge output of [compute_transfer_indices].
#[derive(Debug, Default)]
pub struct TransferIndices {
	/// `transfer_index[i]` is the rooted Transfer Index for `ref_tree.edges()[i]`.
	pub transfer_index : Vec<usize>,

	/// Present only when `want_sets` was `true`: `transfer_sets[i]` is a witness leaf set (of
	/// `alt_tree`) achieving `transfer_index[i]`.
	#[cfg(feature = "transfer_sets")]
	pub transfer_sets : Option<Vec<Vec<NodeIdx>>>,
}

/// Compute the rooted Transfer Index for every internal branch of `ref_tree` against `alt_tree`.
///
/// Both trees must be [Tree::prepare]d and share the same taxon set. `want_sets` additionally
/// requests the witness leaf sets; this is only available when the `transfer_sets` feature is
/// enabled.
#[instrument(skip( ref_tree, alt_tree ), fields( n = ref_tree.n() ))]
pub fn compute_transfer_indices( ref_tree : &mut Tree, alt_tree : &mut Tree, want_sets : bool ) -> Result<TransferIndices, TixError> {
	debug_assert!( ref_tree.is_prepared() && alt_tree.is_prepared() );
	set_leaf_bijection( ref_tree, alt_tree )?;

	let n = alt_tree.n();
	let mut hpt = HeavyPathTree::build( alt_tree );

	#[cfg(feature = "transfer_sets")]
	let mut node_sets : Vec<Option<Vec<NodeIdx>>> = vec![ None; ref_tree.num_nodes() ];
	let mut node_ti : Vec<Option<usize>> = vec![ None; ref_tree.num_nodes() ];

	for &leaf in ref_tree.leaves() {
		add_heavy_path( ref_tree, &mut hpt, leaf, n, want_sets, &mut node_ti, #[cfg(feature = "transfer_sets")] &mut node_sets )?;
		reset_heavy_path( ref_tree, &mut hpt, leaf );
	}

	let transfer_index = node_ti_to_edge_ti( ref_tree, &node_ti );
	for (i, &ti) in transfer_index.iter().enumerate() {
		ref_tree.edge_mut( EdgeIdx::new( i ) ).transfer_index = Some( ti );
	}

	#[cfg(feature = "transfer_sets")]
	let transfer_sets = if want_sets { Some( node_sets_to_edge_sets( ref_tree, &node_sets ) ) } else { None };

	Ok( TransferIndices {
		transfer_index,
		#[cfg(feature = "transfer_sets")]
		transfer_sets,
	} )
}

/// Walk from a reference-tree leaf up to the root, stopping as soon as a node is not the heavy
/// child of its parent. At each visited node, add exactly the leaves newly entering `L(u)`, read
/// `TI_min`/`TI_max`, and record them.
#[allow(unused_variables)]
fn add_heavy_path(
	ref_tree : &Tree,
	hpt : &mut HeavyPathTree,
	leaf : NodeIdx,
	n : usize,
	want_sets : bool,
	node_ti : &mut [Option<usize>],
	#[cfg(feature = "transfer_sets")] node_sets : &mut [Option<Vec<NodeIdx>>],
) -> Result<(), TixError> {
	let mut u = leaf;
	loop {
		let u_is_ref_leaf = ref_tree.is_leaf( u );
		if u_is_ref_leaf {
			let other = ref_tree.other( u ).ok_or_else( || TixError::InvariantFailure {
				message : format!( "reference leaf {u} has no bijected alternative leaf" ),
			} )?;
			hpt.add_leaf( other );
		} else {
			for &light in ref_tree.light_leaves( u ) {
				let other = ref_tree.other( light ).ok_or_else( || TixError::InvariantFailure {
					message : format!( "reference leaf {light} has no bijected alternative leaf" ),
				} )?;
				hpt.add_leaf( other );
			}
		}

		let ti_min = hpt.ti_min();
		let ti_max = hpt.ti_max();
		// `ti_min == 0` is a valid outcome (L(u) exactly matches some alternative subtree's leaf
		// set, which is always the case e.g. when u is a reference leaf); only a negative value
		// indicates a real bookkeeping bug.
		if ti_min < 0 {
			return Err( TixError::InvariantFailure {
				message : format!( "d_min(root) = {ti_min} < 0 at reference node {u}" ),
			} );
		}

		let min_value = ti_min as usize;
		let max_value = n - ti_max as usize;
		// For a reference leaf, L(u) is a singleton that always matches its own bijected
		// alternative leaf exactly, so the transfer index is always 0 (spec §6, "for terminal
		// edges the transfer index is 0").
		let ti = if u_is_ref_leaf { 0 } else { min_value.min( max_value ).min( n / 2 ) };
		node_ti[u.index()] = Some( ti );
		trace!( node = %u, ti_min, ti_max, ti, "computed node TI" );

		#[cfg(feature = "transfer_sets")]
		if want_sets {
			// Spec §6: the transfer set for a terminal edge is the singleton of that leaf, not
			// the (empty) set the generic min/max-side reconstruction would produce — that
			// reconstruction always excludes a leaf from its own subtree walk.
			let set = if u_is_ref_leaf {
				vec![ ref_tree.other( u ).expect( "checked above" ) ]
			} else if min_value <= max_value {
				hpt.get_transfer_set( Side::Min, ti_min, ti )?
			} else {
				hpt.get_transfer_set( Side::Max, ti_max, ti )?
			};
			node_sets[u.index()] = Some( set );
		}

		match ref_tree.parent( u ) {
			Some( p ) if ref_tree.is_heavychild( u ) => u = p,
			_ => break,
		}
	}
	Ok( () )
}

/// Undo the effect of [add_heavy_path] by calling `reset_leaf` on the same alt-tree leaves.
fn reset_heavy_path( ref_tree : &Tree, hpt : &mut HeavyPathTree, leaf : NodeIdx ) {
	let mut u = leaf;
	loop {
		if ref_tree.is_leaf( u ) {
			if let Some( other ) = ref_tree.other( u ) {
				hpt.reset_leaf( other );
			}
		} else {
			for &light in ref_tree.light_leaves( u ) {
				if let Some( other ) = ref_tree.other( light ) {
					hpt.reset_leaf( other );
				}
			}
		}

		match ref_tree.parent( u ) {
			Some( p ) if ref_tree.is_heavychild( u ) => u = p,
			_ => break,
		}
	}
}

/// For every non-root reference node, `edge.transfer_index = node_ti[u]`.
fn node_ti_to_edge_ti( ref_tree : &Tree, node_ti : &[Option<usize>] ) -> Vec<usize> {
	let mut out = vec![ 0usize; ref_tree.edges().len() ];
	for v in ref_tree.node_indices() {
		if let Some( e ) = ref_tree.parent_edge( v ) {
			out[e.index()] = node_ti[v.index()].unwrap_or( 0 );
		}
	}
	out
}

#[cfg(feature = "transfer_sets")]
fn node_sets_to_edge_sets( ref_tree : &Tree, node_sets : &[Option<Vec<NodeIdx>>] ) -> Vec<Vec<NodeIdx>> {
	let mut out = vec![ Vec::new(); ref_tree.edges().len() ];
	for v in ref_tree.node_indices() {
		if let Some( e ) = ref_tree.parent_edge( v ) {
			if let Some( set ) = &node_sets[v.index()] {
				out[e.index()] = set.clone();
			}
		}
	}
	out
}
