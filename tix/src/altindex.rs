//! Direct (no heavy-path decomposition) maintenance of per-node transfer-distance statistics
//! over an alternative tree.
//!
//! This is the "base case" the [crate::heavypath::HeavyPathTree] sweeps reduce single-level
//! steps to; it runs in O(depth) per `add_leaf`/`reset_leaf` call, which is only acceptable
//! when the alternative tree is balanced. The production driver ([crate::driver]) always goes
//! through the heavy-path tree instead, so this module is exercised directly only by tests that
//! check the two approaches agree.

use crate::tree::{NodeIdx, Tree};

/// Per-node transfer-distance bookkeeping for one alternative-tree node.
#[derive(Copy, Clone, Debug)]
struct AltNodeState {
	d_lazy : i64,
	d_min : i64,
	d_max : i64,
	diff : i64,
}

impl AltNodeState {
	fn fresh( subtreesize : usize ) -> Self {
		AltNodeState { d_lazy : subtreesize as i64, d_min : 1, d_max : subtreesize as i64, diff : 0 }
	}
}

/// Maintains `d_lazy`/`d_min`/`d_max`/`diff` directly over `alt_tree`'s nodes, with no heavy-path
/// overlay. `add_leaf`/`reset_leaf` cost O(depth(leaf)).
pub struct AltIndex<'a> {
	tree : &'a Tree,
	state : Vec<AltNodeState>,
}

impl<'a> AltIndex<'a> {
	/// Build a fresh index over `tree`, with every node in its no-leaves-added-yet state.
	pub fn new( tree : &'a Tree ) -> Self {
		debug_assert!( tree.is_prepared() );
		let state = tree.node_indices().map( |v| AltNodeState::fresh( tree.subtreesize( v ) ) ).collect();
		AltIndex { tree, state }
	}

	fn s( &self, v : NodeIdx ) -> &AltNodeState {
		&self.state[v.index()]
	}

	fn s_mut( &mut self, v : NodeIdx ) -> &mut AltNodeState {
		&mut self.state[v.index()]
	}

	/// Root-to-`leaf` path, root first.
	fn path_to_root( &self, leaf : NodeIdx ) -> Vec<NodeIdx> {
		let mut path = vec![ leaf ];
		let mut v = leaf;
		while let Some( p ) = self.tree.parent( v ) {
			path.push( p );
			v = p;
		}
		path.reverse();
		path
	}

	/// Add `leaf` to the "added so far" set L(u). `leaf` must be a leaf of `self.tree`.
	pub fn add_leaf( &mut self, leaf : NodeIdx ) {
		debug_assert!( self.tree.is_leaf( leaf ) );
		let path = self.path_to_root( leaf ); // root .. leaf
		let depth = path.len() - 1;

		// Downward sweep: push diffs down, flip sign off-path.
		for i in 0..depth {
			let v = path[i];
			let on_path_child = path[i + 1];
			let v_diff = self.s( v ).diff;

			self.s_mut( v ).d_lazy += v_diff - 1;
			self.s_mut( on_path_child ).diff += v_diff;
			for &c in self.tree.children( v ) {
				if c != on_path_child {
					self.s_mut( c ).diff += v_diff + 1;
				}
			}
			self.s_mut( v ).diff = 0;
		}

		let leaf_diff = self.s( leaf ).diff;
		self.s_mut( leaf ).d_lazy += leaf_diff - 1;
		self.s_mut( leaf ).diff = 0;

		// Upward sweep: recompute d_min/d_max from d_lazy and children.
		self.s_mut( leaf ).d_min = self.s( leaf ).d_lazy;
		self.s_mut( leaf ).d_max = self.s( leaf ).d_lazy;
		for i in (0..depth).rev() {
			let v = path[i];
			let mut d_min = self.s( v ).d_lazy;
			let mut d_max = self.s( v ).d_lazy;
			for &c in self.tree.children( v ) {
				let cs = self.s( c );
				d_min = d_min.min( cs.d_min + cs.diff );
				d_max = d_max.max( cs.d_max + cs.diff );
			}
			self.s_mut( v ).d_min = d_min;
			self.s_mut( v ).d_max = d_max;
		}
	}

	/// Undo a previous `add_leaf( leaf )`, restoring the fresh-state invariants.
	pub fn reset_leaf( &mut self, leaf : NodeIdx ) {
		debug_assert!( self.tree.is_leaf( leaf ) );
		let mut v = leaf;
		let mut path_child : Option<NodeIdx> = None;
		loop {
			let size = self.tree.subtreesize( v );
			*self.s_mut( v ) = AltNodeState::fresh( size );
			for &c in self.tree.children( v ) {
				if Some( c ) != path_child {
					self.s_mut( c ).diff = 0;
				}
			}
			match self.tree.parent( v ) {
				Some( p ) => {
					path_child = Some( v );
					v = p;
				}
				None => break,
			}
		}
	}

	/// `TI_min(u) = d_min` at the root, given everything added to L(u) so far.
	///
	/// `d_min(root)` reaches `0` exactly when `L(u)` matches some alternative-tree subtree's
	/// leaf set exactly (e.g. whenever `u` is a reference leaf, since its singleton always
	/// matches the bijected alternative leaf) — `0` is a valid Transfer Index, not a bug.
	pub fn query_min( &self ) -> usize {
		let root = self.tree.root();
		debug_assert!( self.s( root ).d_min >= 0 );
		self.s( root ).d_min as usize
	}

	/// `TI_max(u) = d_max` at the root, given everything added to L(u) so far.
	pub fn query_max( &self ) -> usize {
		self.s( self.tree.root() ).d_max as usize
	}
}
